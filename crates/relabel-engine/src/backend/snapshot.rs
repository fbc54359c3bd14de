//! Backend replaying answers recorded from a real analysis service.
//!
//! A snapshot describes one buffer state:
//!
//! ```json
//! {
//!   "diagnostics": {"accurateFlags": true, "diagnostics": []},
//!   "declarations": [
//!     {"position": {"row": 2, "column": 4},
//!      "result": [{"name": "x", "type": "VAR_DECL",
//!                  "extent": {"start": {"row": 2, "column": 4}, "end": {"row": 2, "column": 5}}}]}
//!   ],
//!   "references": [
//!     {"position": {"row": 2, "column": 4},
//!      "result": {"references": [], "cursor_name": "x"}}
//!   ]
//! }
//! ```
//!
//! Answers are looked up by exact position. A missing entry, or a `null`
//! result, replays a backend that returned nothing.

use super::AnalysisBackend;
use async_trait::async_trait;
use relabel_foundation::protocol::{DeclarationInfo, DiagnosticsReport, LocalReferences};
use relabel_foundation::{BufferHandle, RelabelError, RelabelResult, SourcePosition};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Backend answer recorded for one position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedAnswer<T> {
    pub position: SourcePosition,
    pub result: Option<T>,
}

/// Recorded backend answers for one buffer state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendSnapshot {
    #[serde(default)]
    pub diagnostics: Option<DiagnosticsReport>,
    #[serde(default)]
    pub declarations: Vec<PositionedAnswer<Vec<DeclarationInfo>>>,
    #[serde(default)]
    pub references: Vec<PositionedAnswer<LocalReferences>>,
    /// Replay a backend whose every call fails
    #[serde(default)]
    pub unavailable: bool,
}

impl BackendSnapshot {
    pub fn with_diagnostics(mut self, report: DiagnosticsReport) -> Self {
        self.diagnostics = Some(report);
        self
    }

    pub fn with_declarations(
        mut self,
        position: SourcePosition,
        result: Option<Vec<DeclarationInfo>>,
    ) -> Self {
        self.declarations.push(PositionedAnswer { position, result });
        self
    }

    pub fn with_references(
        mut self,
        position: SourcePosition,
        result: Option<LocalReferences>,
    ) -> Self {
        self.references.push(PositionedAnswer { position, result });
        self
    }
}

/// [`AnalysisBackend`] answering from a [`BackendSnapshot`]
#[derive(Debug, Clone)]
pub struct SnapshotBackend {
    snapshot: BackendSnapshot,
}

impl SnapshotBackend {
    pub fn new(snapshot: BackendSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file
    pub async fn load(path: &Path) -> RelabelResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let snapshot: BackendSnapshot = serde_json::from_str(&content)?;
        debug!(
            path = %path.display(),
            declarations = snapshot.declarations.len(),
            references = snapshot.references.len(),
            "Loaded backend snapshot"
        );
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &BackendSnapshot {
        &self.snapshot
    }

    fn ensure_available(&self, operation: &str) -> RelabelResult<()> {
        if self.snapshot.unavailable {
            return Err(RelabelError::backend(operation, "snapshot marks backend unavailable"));
        }
        Ok(())
    }
}

fn lookup<T: Clone>(answers: &[PositionedAnswer<T>], row: u32, column: u32) -> Option<T> {
    let position = SourcePosition::new(row, column);
    answers
        .iter()
        .find(|answer| answer.position == position)
        .and_then(|answer| answer.result.clone())
}

#[async_trait]
impl AnalysisBackend for SnapshotBackend {
    async fn get_diagnostics(
        &self,
        _buffer: &BufferHandle,
    ) -> RelabelResult<Option<DiagnosticsReport>> {
        self.ensure_available("getDiagnostics")?;
        Ok(self.snapshot.diagnostics.clone())
    }

    async fn get_declaration_info(
        &self,
        _buffer: &BufferHandle,
        row: u32,
        column: u32,
    ) -> RelabelResult<Option<Vec<DeclarationInfo>>> {
        self.ensure_available("getDeclarationInfo")?;
        Ok(lookup(&self.snapshot.declarations, row, column))
    }

    async fn get_local_references(
        &self,
        _buffer: &BufferHandle,
        row: u32,
        column: u32,
    ) -> RelabelResult<Option<LocalReferences>> {
        self.ensure_available("getLocalReferences")?;
        Ok(lookup(&self.snapshot.references, row, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relabel_foundation::SourceRange;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "diagnostics": {"accurateFlags": true, "diagnostics": []},
        "declarations": [
            {"position": {"row": 2, "column": 4},
             "result": [{"name": "x", "type": "VAR_DECL",
                         "extent": {"start": {"row": 2, "column": 4}, "end": {"row": 2, "column": 5}}}]},
            {"position": {"row": 9, "column": 0}, "result": null}
        ],
        "references": [
            {"position": {"row": 2, "column": 4},
             "result": {"references": [{"start": {"row": 2, "column": 4}, "end": {"row": 2, "column": 5}}],
                        "cursor_name": "x"}}
        ]
    }"#;

    #[tokio::test]
    async fn test_load_and_replay() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let backend = SnapshotBackend::load(file.path()).await.unwrap();
        let buffer = BufferHandle::for_path("/src/main.c");

        let report = backend.get_diagnostics(&buffer).await.unwrap().unwrap();
        assert!(report.is_clean());

        let declarations = backend.get_declaration_info(&buffer, 2, 4).await.unwrap().unwrap();
        assert_eq!(declarations[0].name, "x");

        let refs = backend.get_local_references(&buffer, 2, 4).await.unwrap().unwrap();
        assert_eq!(refs.references, vec![SourceRange::from_coords((2, 4), (2, 5))]);
    }

    #[tokio::test]
    async fn test_missing_and_null_answers() {
        let snapshot: BackendSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let backend = SnapshotBackend::new(snapshot);
        let buffer = BufferHandle::for_path("/src/main.c");

        assert!(backend.get_declaration_info(&buffer, 9, 0).await.unwrap().is_none());
        assert!(backend.get_declaration_info(&buffer, 2, 5).await.unwrap().is_none());
        assert!(backend.get_local_references(&buffer, 0, 0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_backend_fails_every_call() {
        let backend = SnapshotBackend::new(BackendSnapshot {
            unavailable: true,
            ..Default::default()
        });
        let buffer = BufferHandle::for_path("/src/main.c");

        let err = backend.get_diagnostics(&buffer).await.unwrap_err();
        assert_eq!(err.category(), "backend_error");
        assert!(backend.get_local_references(&buffer, 0, 0).await.is_err());
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"declarations\": 3}").unwrap();

        let err = SnapshotBackend::load(file.path()).await.unwrap_err();
        assert!(matches!(err, RelabelError::Json(_)));
    }
}
