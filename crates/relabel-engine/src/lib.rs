//! Safe local rename for variables and parameters.
//!
//! A rename runs as a short pipeline against an [`AnalysisBackend`]:
//!
//! 1. [`DiagnosticsGate`] refuses buffers whose analysis is inaccurate or
//!    reports any diagnostic.
//! 2. [`SymbolLocator`] resolves the declaration under the cursor and keeps
//!    only variables and parameters.
//! 3. [`ReferenceResolver`] collects every local reference to it.
//! 4. [`build_edits`] turns the references into ordered, non-overlapping
//!    edit operations.
//!
//! [`RefactorEngine`] sequences the stages. Each stage either produces a value
//! or reports why no refactor applies ([`StageOutcome`]); only invariant
//! violations surface as errors.
//!
//! The engine keeps no state between requests. Callers that need to discard
//! superseded requests or memoize backend answers use [`RequestTracker`] and
//! [`KeyedCache`], which they own.

pub mod backend;
pub mod cache;
pub mod edits;
pub mod engine;
pub mod gate;
pub mod locator;
pub mod lsp;
pub mod outcome;
pub mod references;
pub mod tracker;

pub use backend::snapshot::{BackendSnapshot, SnapshotBackend};
pub use backend::AnalysisBackend;
pub use cache::KeyedCache;
pub use edits::build_edits;
pub use engine::RefactorEngine;
pub use gate::DiagnosticsGate;
pub use locator::SymbolLocator;
pub use outcome::{NotApplicable, StageOutcome};
pub use references::ReferenceResolver;
pub use tracker::{RequestToken, RequestTracker};
