//! Symbol locator: the renamable declaration under a cursor.

use crate::backend::AnalysisBackend;
use crate::outcome::{NotApplicable, StageOutcome};
use relabel_foundation::{BufferHandle, SourcePosition, Symbol};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves the declaration at a position and keeps it only if it is a
/// variable or a parameter
#[derive(Clone)]
pub struct SymbolLocator {
    backend: Arc<dyn AnalysisBackend>,
}

impl SymbolLocator {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// Locate the symbol at `position`.
    ///
    /// When the backend offers several candidates the first one wins; no
    /// attempt is made to disambiguate between them.
    pub async fn locate(
        &self,
        buffer: &BufferHandle,
        position: SourcePosition,
    ) -> StageOutcome<Symbol> {
        let candidates = match self
            .backend
            .get_declaration_info(buffer, position.row, position.column)
            .await
        {
            Ok(Some(candidates)) => candidates,
            Ok(None) => return StageOutcome::NotApplicable(NotApplicable::NoSymbol),
            Err(e) => {
                warn!(buffer = %buffer, %position, error = %e, "Declaration lookup failed");
                return StageOutcome::NotApplicable(NotApplicable::BackendUnavailable);
            }
        };

        let Some(first) = candidates.into_iter().next() else {
            return StageOutcome::NotApplicable(NotApplicable::NoSymbol);
        };

        let kind = first.kind();
        if !kind.is_renamable() {
            debug!(
                buffer = %buffer,
                %position,
                name = %first.name,
                tag = %first.kind_tag,
                "Declaration kind not supported for rename"
            );
            return StageOutcome::NotApplicable(NotApplicable::UnsupportedKind);
        }

        StageOutcome::Ready(Symbol {
            name: first.name,
            kind,
            declaration_range: first.extent,
            located_at: position,
        })
    }
}
