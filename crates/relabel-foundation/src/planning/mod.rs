//! Refactor requests, availability records and the edits they produce.

pub mod edit;
pub mod refactor;

pub use edit::*;
pub use refactor::*;
