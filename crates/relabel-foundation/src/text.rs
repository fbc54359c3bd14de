//! Applying edit operations to buffer text.

use crate::error::{RelabelError, RelabelResult};
use crate::model::SourcePosition;
use crate::planning::EditOperation;
use std::ops::Range;

/// Maps row/column positions to byte offsets in a text
#[derive(Debug)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// row -> byte offset of the row's first character
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(idx, _)| idx + 1));
        Self { text, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of one row, without its line terminator
    pub fn line(&self, row: u32) -> Option<&'a str> {
        let row = row as usize;
        let start = *self.line_starts.get(row)?;
        let end = match self.line_starts.get(row + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        let line = &self.text[start..end];
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Byte offset of a position. `None` if the row does not exist or the
    /// column lies past the end of the row.
    pub fn offset(&self, position: SourcePosition) -> Option<usize> {
        let line = self.line(position.row)?;
        let line_start = self.line_starts[position.row as usize];
        let column = position.column as usize;
        if column == line.chars().count() {
            return Some(line_start + line.len());
        }
        line.char_indices()
            .nth(column)
            .map(|(byte_idx, _)| line_start + byte_idx)
    }

    /// Column of a position counted in UTF-16 code units, as LSP clients
    /// expect by default. `None` under the same conditions as [`Self::offset`].
    pub fn utf16_column(&self, position: SourcePosition) -> Option<u32> {
        let line = self.line(position.row)?;
        let column = position.column as usize;
        if column > line.chars().count() {
            return None;
        }
        let units: usize = line.chars().take(column).map(char::len_utf16).sum();
        u32::try_from(units).ok()
    }

    fn byte_range(&self, edit: &EditOperation) -> RelabelResult<Range<usize>> {
        if !edit.range.is_well_formed() {
            return Err(RelabelError::invariant(format!(
                "edit range {} ends before it starts",
                edit.range
            )));
        }
        let start = self.offset(edit.range.start);
        let end = self.offset(edit.range.end);
        match (start, end) {
            (Some(start), Some(end)) => Ok(start..end),
            _ => Err(RelabelError::StaleEdit {
                row: edit.range.start.row,
                column: edit.range.start.column,
                expected: edit.old_text.clone(),
                found: String::new(),
            }),
        }
    }
}

/// Apply one file's edit operations to its text.
///
/// Every operation's `old_text` must match the text currently at its range;
/// otherwise the edits were built from a stale snapshot and nothing is
/// applied. Overlapping operations are rejected as an invariant violation.
pub fn apply_edits(text: &str, edits: &[EditOperation]) -> RelabelResult<String> {
    let index = LineIndex::new(text);

    let mut resolved = Vec::with_capacity(edits.len());
    for edit in edits {
        let range = index.byte_range(edit)?;
        let found = &text[range.clone()];
        if found != edit.old_text {
            return Err(RelabelError::StaleEdit {
                row: edit.range.start.row,
                column: edit.range.start.column,
                expected: edit.old_text.clone(),
                found: found.to_string(),
            });
        }
        resolved.push((range, edit.new_text.as_str()));
    }

    resolved.sort_by_key(|(range, _)| (range.start, range.end));
    for pair in resolved.windows(2) {
        let (first, second) = (&pair[0].0, &pair[1].0);
        if first.end > second.start || first == second {
            return Err(RelabelError::invariant(format!(
                "edits at bytes {:?} and {:?} overlap",
                first, second
            )));
        }
    }

    // Back to front so earlier offsets stay valid
    let mut output = text.to_string();
    for (range, new_text) in resolved.into_iter().rev() {
        output.replace_range(range, new_text);
    }
    Ok(output)
}
