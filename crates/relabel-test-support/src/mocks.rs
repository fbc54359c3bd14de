//! Mock implementations for testing

use async_trait::async_trait;
use mockall::mock;
use relabel_engine::AnalysisBackend;
use relabel_foundation::protocol::{DeclarationInfo, DiagnosticsReport, LocalReferences};
use relabel_foundation::{BufferHandle, RelabelResult};

mock! {
    pub Backend {}

    #[async_trait]
    impl AnalysisBackend for Backend {
        async fn get_diagnostics(
            &self,
            buffer: &BufferHandle,
        ) -> RelabelResult<Option<DiagnosticsReport>>;

        async fn get_declaration_info(
            &self,
            buffer: &BufferHandle,
            row: u32,
            column: u32,
        ) -> RelabelResult<Option<Vec<DeclarationInfo>>>;

        async fn get_local_references(
            &self,
            buffer: &BufferHandle,
            row: u32,
            column: u32,
        ) -> RelabelResult<Option<LocalReferences>>;
    }
}
