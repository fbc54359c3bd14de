//! Refactor orchestrator.

use crate::backend::AnalysisBackend;
use crate::edits::build_edits;
use crate::gate::DiagnosticsGate;
use crate::locator::SymbolLocator;
use crate::outcome::{NotApplicable, StageOutcome};
use crate::references::ReferenceResolver;
use regex::Regex;
use relabel_config::RenameConfig;
use relabel_foundation::{
    BufferHandle, RefactorRequest, RefactorResult, RefactoringDescriptor, RelabelError,
    RelabelResult, SourcePosition,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, instrument};

/// Sequences the gate, locator, resolver and edit builder.
///
/// The engine holds no per-request state: every call derives its answer from
/// the backend afresh, so one engine can serve concurrent requests.
#[derive(Clone)]
pub struct RefactorEngine {
    gate: DiagnosticsGate,
    locator: SymbolLocator,
    resolver: ReferenceResolver,
    identifier_pattern: Option<Regex>,
}

impl RefactorEngine {
    /// Engine accepting any non-empty replacement name
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            gate: DiagnosticsGate::new(backend.clone()),
            locator: SymbolLocator::new(backend.clone()),
            resolver: ReferenceResolver::new(backend),
            identifier_pattern: None,
        }
    }

    /// Engine checking replacement names against the configured pattern
    pub fn with_config(
        backend: Arc<dyn AnalysisBackend>,
        config: &RenameConfig,
    ) -> RelabelResult<Self> {
        let mut engine = Self::new(backend);
        engine.identifier_pattern = config.identifier_regex()?;
        Ok(engine)
    }

    /// Refactorings available at `position`: a single rename offer, or none.
    #[instrument(skip(self, buffer), fields(buffer = %buffer))]
    pub async fn list_refactorings(
        &self,
        buffer: &BufferHandle,
        position: SourcePosition,
    ) -> Vec<RefactoringDescriptor> {
        let start = Instant::now();
        let outcome = self.available_rename(buffer, position).await;

        match outcome {
            StageOutcome::Ready(descriptor) => {
                debug!(
                    symbol = %descriptor.symbol_name,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Rename available"
                );
                vec![descriptor]
            }
            StageOutcome::NotApplicable(reason) => {
                debug!(
                    %reason,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "No refactoring available"
                );
                Vec::new()
            }
        }
    }

    /// Execute a refactor request.
    ///
    /// `Ok(None)` means no refactor applies here. Errors are reserved for
    /// malformed requests and for backend answers that would produce an
    /// inconsistent edit set.
    pub async fn refactor(
        &self,
        buffer: &BufferHandle,
        request: &RefactorRequest,
    ) -> RelabelResult<Option<RefactorResult>> {
        Ok(self.refactor_outcome(buffer, request).await?.into_option())
    }

    /// Like [`RefactorEngine::refactor`], but reports why no refactor applies
    #[instrument(skip(self, buffer, request), fields(buffer = %buffer, kind = ?request.kind()))]
    pub async fn refactor_outcome(
        &self,
        buffer: &BufferHandle,
        request: &RefactorRequest,
    ) -> RelabelResult<StageOutcome<RefactorResult>> {
        let start = Instant::now();

        let outcome = match request {
            RefactorRequest::Rename { position, new_name } => {
                self.rename(buffer, *position, new_name).await
            }
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            Ok(StageOutcome::Ready(result)) => {
                debug!(
                    files = result.edits.len(),
                    edits = result.edit_count(),
                    elapsed_ms,
                    "Refactor planned"
                );
            }
            Ok(StageOutcome::NotApplicable(reason)) => {
                debug!(%reason, elapsed_ms, "Refactor not applicable");
            }
            Err(e) => {
                error!(error = %e, category = e.category(), elapsed_ms, "Refactor failed");
            }
        }

        outcome
    }

    async fn available_rename(
        &self,
        buffer: &BufferHandle,
        position: SourcePosition,
    ) -> StageOutcome<RefactoringDescriptor> {
        if buffer.path().is_none() {
            return StageOutcome::NotApplicable(NotApplicable::NoPath);
        }
        if !self.gate.is_safe(buffer).await {
            return StageOutcome::NotApplicable(NotApplicable::Unsafe);
        }
        self.locator
            .locate(buffer, position)
            .await
            .map(|symbol| RefactoringDescriptor::rename(&symbol))
    }

    async fn rename(
        &self,
        buffer: &BufferHandle,
        position: SourcePosition,
        new_name: &str,
    ) -> RelabelResult<StageOutcome<RefactorResult>> {
        if new_name.is_empty() {
            return Err(RelabelError::invalid_request(
                "rename requires a non-empty new name",
            ));
        }

        let Some(path) = buffer.path() else {
            return Ok(StageOutcome::NotApplicable(NotApplicable::NoPath));
        };
        if !self.gate.is_safe(buffer).await {
            return Ok(StageOutcome::NotApplicable(NotApplicable::Unsafe));
        }
        if !self.accepts_name(new_name) {
            debug!(new_name, "Replacement name rejected by identifier pattern");
            return Ok(StageOutcome::NotApplicable(NotApplicable::InvalidName));
        }

        let symbol = match self.locator.locate(buffer, position).await {
            StageOutcome::Ready(symbol) => symbol,
            StageOutcome::NotApplicable(reason) => return Ok(StageOutcome::NotApplicable(reason)),
        };
        let references = match self.resolver.find_references(buffer, &symbol).await {
            StageOutcome::Ready(references) => references,
            StageOutcome::NotApplicable(reason) => return Ok(StageOutcome::NotApplicable(reason)),
        };

        let mut result = build_edits(&references, new_name)?;
        // A symbol with no references still yields an entry for its buffer
        result.edits.entry(path.to_path_buf()).or_default();

        Ok(StageOutcome::Ready(result))
    }

    fn accepts_name(&self, new_name: &str) -> bool {
        self.identifier_pattern
            .as_ref()
            .map_or(true, |pattern| pattern.is_match(new_name))
    }
}
