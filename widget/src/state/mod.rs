//! Client-side widget state.
//!
//! DESIGN
//! ======
//! State is plain data with no DOM handles so the controller's bookkeeping
//! can be exercised natively. The DOM only mirrors it.

pub mod chat;
pub mod panel;
