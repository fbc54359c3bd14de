//! Shapes of the answers returned by the analysis backend.
//!
//! Declarations and references come back in two distinct shapes (a plain list
//! versus an object carrying a list plus the cursor text). They are kept as
//! separate types so that "absent" and "empty" stay distinguishable at each
//! stage of a rename.

use crate::model::{SourceRange, SymbolKind};
use lsp_types::Diagnostic;
use serde::{Deserialize, Serialize};

/// Diagnostics for one buffer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    /// Whether the backend considers its analysis of the buffer accurate
    pub accurate_flags: bool,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsReport {
    /// Accurate analysis with no diagnostics
    pub fn clean() -> Self {
        Self {
            accurate_flags: true,
            diagnostics: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.accurate_flags && self.diagnostics.is_empty()
    }
}

/// One declaration candidate at a queried position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationInfo {
    pub name: String,
    /// Backend kind tag such as `VAR_DECL`
    #[serde(rename = "type")]
    pub kind_tag: String,
    pub extent: SourceRange,
}

impl DeclarationInfo {
    pub fn kind(&self) -> SymbolKind {
        SymbolKind::from_tag(&self.kind_tag)
    }
}

/// Local references to the symbol under a queried position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalReferences {
    pub references: Vec<SourceRange>,
    /// Token text of the symbol under the cursor
    pub cursor_name: String,
}
