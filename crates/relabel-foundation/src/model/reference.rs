use super::position::SourceRange;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A textual occurrence of a symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// File the occurrence lives in
    pub path: PathBuf,
    pub range: SourceRange,
}

/// Every local reference to one symbol, plus the token text they share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSet {
    pub references: Vec<Reference>,
    /// Exact current text of the symbol's token at each reference
    pub canonical_text: String,
}

impl ReferenceSet {
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }
}
