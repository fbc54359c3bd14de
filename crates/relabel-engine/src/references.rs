//! Reference resolver: every local reference to a located symbol.

use crate::backend::AnalysisBackend;
use crate::outcome::{NotApplicable, StageOutcome};
use relabel_foundation::{BufferHandle, Reference, ReferenceSet, Symbol};
use std::sync::Arc;
use tracing::{debug, warn};

/// Asks the backend for the references to a symbol within its buffer
#[derive(Clone)]
pub struct ReferenceResolver {
    backend: Arc<dyn AnalysisBackend>,
}

impl ReferenceResolver {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// Resolve the references to `symbol`.
    ///
    /// An empty reference list is a valid answer. A missing answer, or one
    /// whose cursor text does not name the symbol, is not.
    pub async fn find_references(
        &self,
        buffer: &BufferHandle,
        symbol: &Symbol,
    ) -> StageOutcome<ReferenceSet> {
        let Some(path) = buffer.path() else {
            return StageOutcome::NotApplicable(NotApplicable::NoPath);
        };
        let position = symbol.located_at;

        let local = match self
            .backend
            .get_local_references(buffer, position.row, position.column)
            .await
        {
            Ok(Some(local)) => local,
            Ok(None) => {
                debug!(buffer = %buffer, symbol = %symbol.name, "Backend could not resolve references");
                return StageOutcome::NotApplicable(NotApplicable::NoReferences);
            }
            Err(e) => {
                warn!(buffer = %buffer, symbol = %symbol.name, error = %e, "Reference lookup failed");
                return StageOutcome::NotApplicable(NotApplicable::BackendUnavailable);
            }
        };

        if local.cursor_name.is_empty() || local.cursor_name != symbol.name {
            warn!(
                buffer = %buffer,
                symbol = %symbol.name,
                cursor_name = %local.cursor_name,
                "Reference set does not match located symbol"
            );
            return StageOutcome::NotApplicable(NotApplicable::InconsistentReferences);
        }

        let references = local
            .references
            .into_iter()
            .map(|range| Reference {
                path: path.to_path_buf(),
                range,
            })
            .collect();

        StageOutcome::Ready(ReferenceSet {
            references,
            canonical_text: local.cursor_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::snapshot::{BackendSnapshot, SnapshotBackend};
    use relabel_foundation::protocol::LocalReferences;
    use relabel_foundation::{SourcePosition, SourceRange, SymbolKind};
    use std::path::Path;

    fn symbol(name: &str) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::VariableDeclaration,
            declaration_range: SourceRange::from_coords((2, 4), (2, 5)),
            located_at: SourcePosition::new(5, 10),
        }
    }

    fn resolver_with(result: Option<LocalReferences>) -> ReferenceResolver {
        // Answers are recorded at the cursor the symbol was located from
        let snapshot = BackendSnapshot::default().with_references(SourcePosition::new(5, 10), result);
        ReferenceResolver::new(Arc::new(SnapshotBackend::new(snapshot)))
    }

    #[tokio::test]
    async fn test_references_carry_buffer_path() {
        let resolver = resolver_with(Some(LocalReferences {
            references: vec![
                SourceRange::from_coords((2, 4), (2, 5)),
                SourceRange::from_coords((5, 10), (5, 11)),
            ],
            cursor_name: "x".to_string(),
        }));

        let set = resolver
            .find_references(&BufferHandle::for_path("/src/a.c"), &symbol("x"))
            .await
            .into_option()
            .unwrap();

        assert_eq!(set.canonical_text, "x");
        assert_eq!(set.len(), 2);
        assert!(set.references.iter().all(|r| r.path == Path::new("/src/a.c")));
    }

    #[tokio::test]
    async fn test_zero_references_is_not_absent() {
        let resolver = resolver_with(Some(LocalReferences {
            references: Vec::new(),
            cursor_name: "x".to_string(),
        }));
        let set = resolver
            .find_references(&BufferHandle::for_path("/src/a.c"), &symbol("x"))
            .await
            .into_option()
            .unwrap();
        assert!(set.is_empty());

        let absent = resolver_with(None);
        assert_eq!(
            absent
                .find_references(&BufferHandle::for_path("/src/a.c"), &symbol("x"))
                .await
                .reason(),
            Some(NotApplicable::NoReferences)
        );
    }

    #[tokio::test]
    async fn test_mismatched_cursor_name() {
        let resolver = resolver_with(Some(LocalReferences {
            references: vec![SourceRange::from_coords((2, 4), (2, 5))],
            cursor_name: "y".to_string(),
        }));
        let outcome = resolver
            .find_references(&BufferHandle::for_path("/src/a.c"), &symbol("x"))
            .await;
        assert_eq!(outcome.reason(), Some(NotApplicable::InconsistentReferences));
    }

    #[tokio::test]
    async fn test_untitled_buffer() {
        let resolver = resolver_with(None);
        let outcome = resolver
            .find_references(&BufferHandle::untitled("scratch"), &symbol("x"))
            .await;
        assert_eq!(outcome.reason(), Some(NotApplicable::NoPath));
    }
}
