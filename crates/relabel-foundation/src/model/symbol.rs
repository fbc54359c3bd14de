//! Symbols resolved at a cursor position.

use super::position::{SourcePosition, SourceRange};
use serde::{Deserialize, Serialize};

/// Backend tag for a local variable declaration
pub const VAR_DECL_TAG: &str = "VAR_DECL";
/// Backend tag for a function parameter declaration
pub const PARM_DECL_TAG: &str = "PARM_DECL";

/// Kind of a declaration, as far as renaming is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    VariableDeclaration,
    ParameterDeclaration,
    Other,
}

impl SymbolKind {
    /// Map a backend kind tag to a symbol kind. Unknown tags are `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            VAR_DECL_TAG => SymbolKind::VariableDeclaration,
            PARM_DECL_TAG => SymbolKind::ParameterDeclaration,
            _ => SymbolKind::Other,
        }
    }

    /// Whether a local rename may be offered for this kind
    pub fn is_renamable(self) -> bool {
        matches!(
            self,
            SymbolKind::VariableDeclaration | SymbolKind::ParameterDeclaration
        )
    }
}

/// A declaration resolved from one analysis snapshot of one buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub declaration_range: SourceRange,
    /// Cursor position the symbol was resolved from
    pub located_at: SourcePosition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(SymbolKind::from_tag("VAR_DECL"), SymbolKind::VariableDeclaration);
        assert_eq!(SymbolKind::from_tag("PARM_DECL"), SymbolKind::ParameterDeclaration);
        assert_eq!(SymbolKind::from_tag("FUNCTION_DECL"), SymbolKind::Other);
        assert_eq!(SymbolKind::from_tag("var_decl"), SymbolKind::Other);
    }

    #[test]
    fn test_renamable_kinds() {
        assert!(SymbolKind::VariableDeclaration.is_renamable());
        assert!(SymbolKind::ParameterDeclaration.is_renamable());
        assert!(!SymbolKind::Other.is_renamable());
    }
}
