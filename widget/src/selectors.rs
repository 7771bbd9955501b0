//! Selector resolution across markup namespaces.

#[cfg(test)]
#[path = "selectors_test.rs"]
mod selectors_test;

/// Resolve the first candidate selector that `lookup` finds an element for.
///
/// Candidates are tried in order; later ones are never queried once an
/// earlier one matches.
pub fn first_match<T>(candidates: &[String], mut lookup: impl FnMut(&str) -> Option<T>) -> Option<T> {
    candidates.iter().find_map(|selector| lookup(selector))
}
