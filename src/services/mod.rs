//! Domain services behind the HTTP routes.
//!
//! `ai` relays provider streams, `courses` and `session` read the shared
//! catalogue tables, `prompt` turns course data into model prompts.

pub mod ai;
pub mod courses;
pub mod prompt;
pub mod session;
