//! Prompt construction for the search and summarize endpoints.
//!
//! DESIGN
//! ======
//! Search answers are grounded in the user's whole catalogue, grouped by
//! semester; summaries describe one semester in detail. Long descriptions
//! are clipped in search context so a full catalogue stays within the
//! provider's context budget.

#[cfg(test)]
#[path = "prompt_test.rs"]
mod prompt_test;

use std::fmt::Write;

use super::courses::{Course, SEMESTERS};

pub const SEARCH_MAX_TOKENS: u32 = 250;
pub const SUMMARIZE_MAX_TOKENS: u32 = 200;

/// Characters of each description kept in search context.
const SEARCH_DESCRIPTION_CHARS: usize = 100;

pub const NO_COURSES_MESSAGE: &str = "No courses found for this semester. Add some courses first!";

/// Build the `/ai/search` prompt for `query` over the user's courses.
#[must_use]
pub fn search_prompt(query: &str, courses: &[Course]) -> String {
    let context = academic_context(courses);
    if context.is_empty() {
        return format!("Answer briefly: {query}\n\nProvide a concise explanation in 2-3 sentences.");
    }
    format!(
        "{context}\n\nUser Question: {query}\n\n\
         Provide a helpful answer based on their courses and academic context. \
         If the question relates to their subjects, reference them specifically. \
         Keep response concise (2-4 sentences)."
    )
}

/// Build the `/ai/summarize` prompt for one semester's courses.
#[must_use]
pub fn summarize_prompt(semester: i32, courses: &[Course]) -> String {
    let mut out = format!("Analyze these Semester {semester} courses:\n");
    let details: Vec<String> = courses
        .iter()
        .map(|c| {
            let mut detail = credit_label(c);
            if let Some(desc) = c.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = write!(detail, ": {desc}");
            }
            format!("- {detail}")
        })
        .collect();
    out.push_str(&details.join("\n"));
    out.push_str(
        "\n\nProvide:\n\
         1. Brief overview of this semester's focus\n\
         2. Key topics covered\n\
         3. 2-3 study tips for managing these subjects together",
    );
    out
}

fn academic_context(courses: &[Course]) -> String {
    let mut lines = Vec::new();
    for semester in SEMESTERS {
        let details: Vec<String> = courses
            .iter()
            .filter(|c| c.semester == semester)
            .map(|c| {
                let mut detail = credit_label(c);
                if let Some(desc) = c.description.as_deref().filter(|d| !d.is_empty()) {
                    let clipped: String = desc.chars().take(SEARCH_DESCRIPTION_CHARS).collect();
                    let _ = write!(detail, " - {clipped}");
                }
                detail
            })
            .collect();
        if !details.is_empty() {
            lines.push(format!("Semester {semester}: {}", details.join("; ")));
        }
    }
    if lines.is_empty() {
        return String::new();
    }
    format!("User's Academic Data:\n{}", lines.join("\n"))
}

fn credit_label(course: &Course) -> String {
    format!("{} ({} credits)", course.name, course.credits)
}
