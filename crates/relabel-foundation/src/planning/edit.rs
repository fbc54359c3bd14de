//! Contains the edit operation and refactor result types.

use crate::model::{SourcePosition, SourceRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single range-scoped text replacement
///
/// `old_text` is the text the buffer holds at `range` when the edit was
/// built. Keeping it lets the application layer reject stale edits and lets
/// callers undo a rename with [`invert_edits`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOperation {
    pub range: SourceRange,
    pub old_text: String,
    pub new_text: String,
}

impl EditOperation {
    pub fn new(range: SourceRange, old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            range,
            old_text: old_text.into(),
            new_text: new_text.into(),
        }
    }

    /// End position of `new_text` once it has been written at `start`
    fn end_after_insert(&self, start: SourcePosition) -> SourcePosition {
        let mut rows = self.new_text.split('\n');
        let first = rows.next().unwrap_or_default();
        match rows.enumerate().last() {
            None => SourcePosition::new(start.row, start.column + first.chars().count() as u32),
            Some((idx, last)) => {
                SourcePosition::new(start.row + idx as u32 + 1, last.chars().count() as u32)
            }
        }
    }
}

/// The operations undoing `edits` once they have all been applied to a file.
///
/// Each inverse range addresses the rewritten text: an edit's start moves by
/// the rows the earlier edits added or removed, and by the column shift of an
/// earlier edit ending on the same row.
pub fn invert_edits(edits: &[EditOperation]) -> Vec<EditOperation> {
    let mut sorted: Vec<&EditOperation> = edits.iter().collect();
    sorted.sort_by_key(|edit| edit.range);

    // (end in the original text, end in the rewritten text) of the previous edit
    let mut previous: Option<(SourcePosition, SourcePosition)> = None;
    let mut inverse = Vec::with_capacity(sorted.len());

    for edit in sorted {
        let start = edit.range.start;
        let shifted = match previous {
            None => start,
            Some((old_end, new_end)) if start.row == old_end.row => {
                SourcePosition::new(new_end.row, new_end.column + (start.column - old_end.column))
            }
            Some((old_end, new_end)) => {
                SourcePosition::new(new_end.row + (start.row - old_end.row), start.column)
            }
        };
        let end = edit.end_after_insert(shifted);
        previous = Some((edit.range.end, end));

        inverse.push(EditOperation {
            range: SourceRange::new(shifted, end),
            old_text: edit.new_text.clone(),
            new_text: edit.old_text.clone(),
        });
    }
    inverse
}

/// Result of a refactor: ordered edit operations per file path
///
/// Backed by a `BTreeMap` so that iteration and serialization order never
/// depend on hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactorResult {
    pub edits: BTreeMap<PathBuf, Vec<EditOperation>>,
}

impl RefactorResult {
    pub fn new(edits: BTreeMap<PathBuf, Vec<EditOperation>>) -> Self {
        Self { edits }
    }

    pub fn edits_for(&self, path: &Path) -> Option<&[EditOperation]> {
        self.edits.get(path).map(Vec::as_slice)
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.edits.keys().map(PathBuf::as_path)
    }

    /// Total number of edit operations across all files
    pub fn edit_count(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }

    /// The result undoing this one, for buffers it has already been applied to
    pub fn inverted(&self) -> Self {
        let edits = self
            .edits
            .iter()
            .map(|(path, ops)| (path.clone(), invert_edits(ops)))
            .collect();
        Self { edits }
    }
}
