//! Refactor requests and availability records.

use crate::error::{RelabelError, RelabelResult};
use crate::model::{SourcePosition, SourceRange, Symbol};
use serde::{Deserialize, Serialize};

/// Kinds of refactoring the engine can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefactoringKind {
    Rename,
}

/// A refactoring available at a point. Describes an offer, carries no edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactoringDescriptor {
    pub kind: RefactoringKind,
    pub symbol_name: String,
    pub symbol_range: SourceRange,
}

impl RefactoringDescriptor {
    pub fn rename(symbol: &Symbol) -> Self {
        Self {
            kind: RefactoringKind::Rename,
            symbol_name: symbol.name.clone(),
            symbol_range: symbol.declaration_range,
        }
    }

    /// Short label for a UI affordance, e.g. "Rename `x`"
    pub fn title(&self) -> String {
        match self.kind {
            RefactoringKind::Rename => format!("Rename `{}`", self.symbol_name),
        }
    }
}

/// A request to execute a refactoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefactorRequest {
    #[serde(rename_all = "camelCase")]
    Rename {
        position: SourcePosition,
        new_name: String,
    },
}

impl RefactorRequest {
    /// Build a rename request, rejecting an empty replacement name
    pub fn rename(position: SourcePosition, new_name: impl Into<String>) -> RelabelResult<Self> {
        let new_name = new_name.into();
        if new_name.is_empty() {
            return Err(RelabelError::invalid_request(
                "rename requires a non-empty new name",
            ));
        }
        Ok(RefactorRequest::Rename { position, new_name })
    }

    pub fn kind(&self) -> RefactoringKind {
        match self {
            RefactorRequest::Rename { .. } => RefactoringKind::Rename,
        }
    }
}
