//! Later pipeline stages must not reach the backend once an earlier one stops.

use mockall::predicate::eq;
use relabel_config::RenameConfig;
use relabel_engine::{NotApplicable, RefactorEngine};
use relabel_foundation::protocol::{DiagnosticsReport, LocalReferences};
use relabel_foundation::{BufferHandle, RefactorRequest, RelabelError, SourcePosition};
use relabel_test_support::fixtures::{declaration, error_diagnostic, CURSOR, DECLARATION, USE};
use relabel_test_support::MockBackend;
use std::sync::Arc;

fn buffer() -> BufferHandle {
    BufferHandle::for_path("/workspace/src/sum.c")
}

fn rename(name: &str) -> RefactorRequest {
    RefactorRequest::rename(CURSOR, name).unwrap()
}

#[tokio::test]
async fn test_unsafe_buffer_skips_lookup() {
    let mut backend = MockBackend::new();
    backend.expect_get_diagnostics().times(1).returning(|_| {
        Ok(Some(DiagnosticsReport {
            accurate_flags: true,
            diagnostics: vec![error_diagnostic(1, "unknown type name 'itn'")],
        }))
    });
    backend.expect_get_declaration_info().never();
    backend.expect_get_local_references().never();

    let engine = RefactorEngine::new(Arc::new(backend));
    let outcome = engine.refactor_outcome(&buffer(), &rename("y")).await.unwrap();

    assert_eq!(outcome.reason(), Some(NotApplicable::Unsafe));
}

#[tokio::test]
async fn test_untitled_buffer_never_reaches_backend() {
    let mut backend = MockBackend::new();
    backend.expect_get_diagnostics().never();
    backend.expect_get_declaration_info().never();
    backend.expect_get_local_references().never();

    let engine = RefactorEngine::new(Arc::new(backend));
    let buffer = BufferHandle::untitled("untitled-1");

    assert!(engine.list_refactorings(&buffer, CURSOR).await.is_empty());
    assert!(engine.refactor(&buffer, &rename("y")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_invalid_name_skips_lookup() {
    let mut backend = MockBackend::new();
    backend
        .expect_get_diagnostics()
        .times(1)
        .returning(|_| Ok(Some(DiagnosticsReport::clean())));
    backend.expect_get_declaration_info().never();
    backend.expect_get_local_references().never();

    let config = RenameConfig {
        enforce_identifier_pattern: true,
        ..Default::default()
    };
    let engine = RefactorEngine::with_config(Arc::new(backend), &config).unwrap();
    let outcome = engine
        .refactor_outcome(&buffer(), &rename("not an identifier"))
        .await
        .unwrap();

    assert_eq!(outcome.reason(), Some(NotApplicable::InvalidName));
}

#[tokio::test]
async fn test_unsupported_kind_skips_references() {
    let mut backend = MockBackend::new();
    backend
        .expect_get_diagnostics()
        .times(1)
        .returning(|_| Ok(Some(DiagnosticsReport::clean())));
    backend
        .expect_get_declaration_info()
        .with(mockall::predicate::always(), eq(2), eq(6))
        .times(1)
        .returning(|_, _, _| Ok(Some(vec![declaration("sum", "FUNCTION_DECL", DECLARATION)])));
    backend.expect_get_local_references().never();

    let engine = RefactorEngine::new(Arc::new(backend));
    let outcome = engine.refactor_outcome(&buffer(), &rename("y")).await.unwrap();

    assert_eq!(outcome.reason(), Some(NotApplicable::UnsupportedKind));
}

#[tokio::test]
async fn test_references_queried_at_request_position() {
    let mut backend = MockBackend::new();
    backend
        .expect_get_diagnostics()
        .times(1)
        .returning(|_| Ok(Some(DiagnosticsReport::clean())));
    backend
        .expect_get_declaration_info()
        .times(1)
        .returning(|_, _, _| Ok(Some(vec![declaration("x", "VAR_DECL", DECLARATION)])));
    backend
        .expect_get_local_references()
        .withf(|buffer, row, column| {
            buffer.id == "/workspace/src/sum.c" && *row == CURSOR.row && *column == CURSOR.column
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(Some(LocalReferences {
                references: vec![USE, DECLARATION],
                cursor_name: "x".to_string(),
            }))
        });

    let engine = RefactorEngine::new(Arc::new(backend));
    let result = engine.refactor(&buffer(), &rename("y")).await.unwrap().unwrap();

    assert_eq!(result.edit_count(), 2);
}

#[tokio::test]
async fn test_backend_failures_are_absorbed() {
    let mut backend = MockBackend::new();
    backend
        .expect_get_diagnostics()
        .returning(|_| Ok(Some(DiagnosticsReport::clean())));
    backend
        .expect_get_declaration_info()
        .returning(|_, _, _| Err(RelabelError::backend("getDeclarationInfo", "connection reset")));
    backend.expect_get_local_references().never();

    let engine = RefactorEngine::new(Arc::new(backend));

    let outcome = engine.refactor_outcome(&buffer(), &rename("y")).await.unwrap();
    assert_eq!(outcome.reason(), Some(NotApplicable::BackendUnavailable));
    assert!(engine.list_refactorings(&buffer(), CURSOR).await.is_empty());
}

#[tokio::test]
async fn test_diagnostics_failure_fails_closed() {
    let mut backend = MockBackend::new();
    backend
        .expect_get_diagnostics()
        .times(1)
        .returning(|_| Err(RelabelError::backend("getDiagnostics", "timeout")));
    backend.expect_get_declaration_info().never();

    let engine = RefactorEngine::new(Arc::new(backend));
    let offers = engine
        .list_refactorings(&buffer(), SourcePosition::new(0, 0))
        .await;

    assert!(offers.is_empty());
}

#[tokio::test]
async fn test_empty_name_rejected_before_backend() {
    let mut backend = MockBackend::new();
    backend.expect_get_diagnostics().never();

    let engine = RefactorEngine::new(Arc::new(backend));
    let request = RefactorRequest::Rename {
        position: CURSOR,
        new_name: String::new(),
    };

    let err = engine.refactor(&buffer(), &request).await.unwrap_err();
    assert!(matches!(err, RelabelError::InvalidRequest { .. }));
}
