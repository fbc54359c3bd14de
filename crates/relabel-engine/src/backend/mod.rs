//! The analysis backend consumed by the engine.

pub mod snapshot;

use async_trait::async_trait;
use relabel_foundation::protocol::{DeclarationInfo, DiagnosticsReport, LocalReferences};
use relabel_foundation::{BufferHandle, RelabelResult};

/// Semantic analysis service for one or more buffers
///
/// `Ok(None)` means the backend had no answer; `Err` means the call itself
/// failed. The engine treats both as "no refactor available", but keeps them
/// apart in its logs.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Diagnostics of the buffer's current analysis
    async fn get_diagnostics(&self, buffer: &BufferHandle)
        -> RelabelResult<Option<DiagnosticsReport>>;

    /// Declaration candidates at a position, best first
    async fn get_declaration_info(
        &self,
        buffer: &BufferHandle,
        row: u32,
        column: u32,
    ) -> RelabelResult<Option<Vec<DeclarationInfo>>>;

    /// References, local to the buffer, of the symbol at a position
    async fn get_local_references(
        &self,
        buffer: &BufferHandle,
        row: u32,
        column: u32,
    ) -> RelabelResult<Option<LocalReferences>>;
}
