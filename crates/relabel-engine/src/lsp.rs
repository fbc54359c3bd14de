//! Conversion of rename results into LSP workspace edits and code actions.
//!
//! Rows become lines unchanged. Columns count characters, which is the
//! `utf-32` position encoding; a server advertising [`ColumnEncoding::Utf32`]
//! can pass them through as is. Clients that negotiate nothing expect UTF-16
//! code units, so [`to_workspace_edit_utf16`] re-counts columns against the
//! file text.

use lsp_types::{
    CodeAction, CodeActionKind, Position, PositionEncodingKind, Range, TextEdit, Uri,
    WorkspaceEdit,
};
use relabel_foundation::text::LineIndex;
use relabel_foundation::{
    EditOperation, RefactorResult, RefactoringDescriptor, RelabelError, RelabelResult,
    SourcePosition, SourceRange,
};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Code action kind for rename offers
pub const REFACTOR_RENAME: &str = "refactor.rename";

/// How LSP `character` offsets are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnEncoding {
    /// Unicode scalar values, the native column unit
    #[default]
    Utf32,
    /// UTF-16 code units, the LSP default
    Utf16,
}

impl ColumnEncoding {
    pub fn kind(self) -> PositionEncodingKind {
        match self {
            ColumnEncoding::Utf32 => PositionEncodingKind::UTF32,
            ColumnEncoding::Utf16 => PositionEncodingKind::UTF16,
        }
    }

    /// Pick the encoding for a client's `general.positionEncodings`.
    /// A client that lists none only understands UTF-16.
    pub fn negotiate(offered: Option<&[PositionEncodingKind]>) -> Self {
        match offered {
            Some(kinds) if kinds.contains(&PositionEncodingKind::UTF32) => ColumnEncoding::Utf32,
            _ => ColumnEncoding::Utf16,
        }
    }
}

pub fn to_lsp_position(position: SourcePosition) -> Position {
    Position {
        line: position.row,
        character: position.column,
    }
}

pub fn to_lsp_range(range: SourceRange) -> Range {
    Range {
        start: to_lsp_position(range.start),
        end: to_lsp_position(range.end),
    }
}

/// `file://` URI for a path. Relative paths resolve against the current
/// directory.
pub fn file_uri(path: &Path) -> RelabelResult<Uri> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let url = url::Url::from_file_path(&absolute).map_err(|_| {
        RelabelError::invalid_request(format!(
            "cannot build a file URI for {}",
            absolute.display()
        ))
    })?;

    Uri::from_str(url.as_str()).map_err(|e| {
        RelabelError::invalid_request(format!("invalid file URI {}: {}", url, e))
    })
}

/// Workspace edit with character columns, for servers using [`ColumnEncoding::Utf32`]
pub fn to_workspace_edit(result: &RefactorResult) -> RelabelResult<WorkspaceEdit> {
    build_workspace_edit(result, |_, op| Ok(to_lsp_range(op.range)))
}

/// Workspace edit with UTF-16 columns. `read_text` supplies the current
/// text of each edited file, which the columns are re-counted against.
pub fn to_workspace_edit_utf16<F>(
    result: &RefactorResult,
    mut read_text: F,
) -> RelabelResult<WorkspaceEdit>
where
    F: FnMut(&Path) -> RelabelResult<String>,
{
    let mut texts = HashMap::with_capacity(result.edits.len());
    for path in result.files() {
        texts.insert(path.to_path_buf(), read_text(path)?);
    }

    build_workspace_edit(result, |path, op| {
        let text = texts.get(path).map(String::as_str).unwrap_or_default();
        let index = LineIndex::new(text);
        Ok(Range {
            start: utf16_position(&index, op.range.start, op)?,
            end: utf16_position(&index, op.range.end, op)?,
        })
    })
}

/// Workspace edit in whichever encoding was negotiated with the client
pub fn to_workspace_edit_in<F>(
    result: &RefactorResult,
    encoding: ColumnEncoding,
    read_text: F,
) -> RelabelResult<WorkspaceEdit>
where
    F: FnMut(&Path) -> RelabelResult<String>,
{
    match encoding {
        ColumnEncoding::Utf32 => to_workspace_edit(result),
        ColumnEncoding::Utf16 => to_workspace_edit_utf16(result, read_text),
    }
}

fn utf16_position(
    index: &LineIndex<'_>,
    position: SourcePosition,
    op: &EditOperation,
) -> RelabelResult<Position> {
    let character = index
        .utf16_column(position)
        .ok_or_else(|| RelabelError::StaleEdit {
            row: op.range.start.row,
            column: op.range.start.column,
            expected: op.old_text.clone(),
            found: String::new(),
        })?;
    Ok(Position {
        line: position.row,
        character,
    })
}

fn build_workspace_edit<F>(
    result: &RefactorResult,
    mut convert: F,
) -> RelabelResult<WorkspaceEdit>
where
    F: FnMut(&Path, &EditOperation) -> RelabelResult<Range>,
{
    let mut changes = HashMap::with_capacity(result.edits.len());
    for (path, operations) in &result.edits {
        let edits = operations
            .iter()
            .map(|op| {
                Ok(TextEdit {
                    range: convert(path, op)?,
                    new_text: op.new_text.clone(),
                })
            })
            .collect::<RelabelResult<Vec<_>>>()?;
        changes.insert(file_uri(path)?, edits);
    }

    Ok(WorkspaceEdit {
        changes: Some(changes),
        document_changes: None,
        change_annotations: None,
    })
}

/// Wrap a rename offer and its workspace edit as a code action
pub fn to_code_action(descriptor: &RefactoringDescriptor, edit: WorkspaceEdit) -> CodeAction {
    CodeAction {
        title: descriptor.title(),
        kind: Some(CodeActionKind::new(REFACTOR_RENAME)),
        edit: Some(edit),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use relabel_foundation::RefactoringKind;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn result() -> RefactorResult {
        let mut edits = BTreeMap::new();
        edits.insert(
            PathBuf::from("/src/a.c"),
            vec![
                EditOperation::new(SourceRange::from_coords((2, 4), (2, 5)), "x", "y"),
                EditOperation::new(SourceRange::from_coords((5, 10), (5, 11)), "x", "y"),
            ],
        );
        RefactorResult::new(edits)
    }

    #[test]
    fn test_file_uri() {
        let uri = file_uri(Path::new("/src/a.c")).unwrap();
        assert_eq!(uri, Uri::from_str("file:///src/a.c").unwrap());
    }

    #[test]
    fn test_workspace_edit() {
        let edit = to_workspace_edit(&result()).unwrap();
        let changes = edit.changes.unwrap();
        let uri = Uri::from_str("file:///src/a.c").unwrap();

        assert_eq!(
            changes[&uri],
            vec![
                TextEdit {
                    range: Range::new(Position::new(2, 4), Position::new(2, 5)),
                    new_text: "y".to_string(),
                },
                TextEdit {
                    range: Range::new(Position::new(5, 10), Position::new(5, 11)),
                    new_text: "y".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_code_action() {
        let descriptor = RefactoringDescriptor {
            kind: RefactoringKind::Rename,
            symbol_name: "x".to_string(),
            symbol_range: SourceRange::from_coords((2, 4), (2, 5)),
        };
        let action = to_code_action(&descriptor, to_workspace_edit(&result()).unwrap());

        assert_eq!(action.title, "Rename `x`");
        assert_eq!(action.kind, Some(CodeActionKind::new("refactor.rename")));
        assert!(action.edit.is_some());
        assert!(action.diagnostics.is_none());
    }

    #[test]
    fn test_utf16_columns_follow_astral_characters() {
        let text = "char *s = \"😀\"; int x = 1;\n";
        let mut edits = BTreeMap::new();
        edits.insert(
            PathBuf::from("/src/b.c"),
            vec![EditOperation::new(SourceRange::from_coords((0, 19), (0, 20)), "x", "y")],
        );
        let result = RefactorResult::new(edits);

        let edit = to_workspace_edit_utf16(&result, |_| Ok(text.to_string())).unwrap();
        let uri = Uri::from_str("file:///src/b.c").unwrap();
        assert_eq!(
            edit.changes.unwrap()[&uri][0].range,
            Range::new(Position::new(0, 20), Position::new(0, 21))
        );

        // Character columns are left alone
        let edit = to_workspace_edit(&result).unwrap();
        assert_eq!(
            edit.changes.unwrap()[&uri][0].range,
            Range::new(Position::new(0, 19), Position::new(0, 20))
        );
    }

    #[test]
    fn test_utf16_rejects_columns_past_the_line() {
        let mut edits = BTreeMap::new();
        edits.insert(
            PathBuf::from("/src/b.c"),
            vec![EditOperation::new(SourceRange::from_coords((0, 8), (0, 9)), "x", "y")],
        );
        let err = to_workspace_edit_utf16(&RefactorResult::new(edits), |_| Ok("int x;".to_string()))
            .unwrap_err();
        assert!(matches!(err, RelabelError::StaleEdit { row: 0, column: 8, .. }));
    }

    #[test]
    fn test_encoding_negotiation() {
        assert_eq!(ColumnEncoding::negotiate(None), ColumnEncoding::Utf16);
        assert_eq!(
            ColumnEncoding::negotiate(Some(
                &[PositionEncodingKind::UTF16, PositionEncodingKind::UTF32][..]
            )),
            ColumnEncoding::Utf32
        );
        assert_eq!(
            ColumnEncoding::negotiate(Some(&[PositionEncodingKind::UTF8][..])),
            ColumnEncoding::Utf16
        );
        assert_eq!(ColumnEncoding::default().kind(), PositionEncodingKind::UTF32);
    }
}
