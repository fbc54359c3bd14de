//! Foundation Layer - Core types, backend protocol definitions and errors
//!
//! This crate provides the building blocks shared by the rename engine,
//! its configuration and the CLI:
//! - Source positions, ranges, symbols and buffer handles (`model`)
//! - Edit operations, refactor requests and results (`planning`)
//! - Shapes of the analysis backend's answers (`protocol`)
//! - Applying edit operations back onto text (`text`)

pub mod error;
pub mod model;
pub mod planning;
pub mod protocol;
pub mod text;

// Re-export commonly used types for convenience
pub use error::*;
pub use model::*;
pub use planning::*;
