//! Edit builder: reference set plus replacement name to edit operations.

use relabel_foundation::{
    EditOperation, RefactorResult, ReferenceSet, RelabelError, RelabelResult,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Build one edit per reference, replacing the canonical text with `new_name`.
///
/// Edits are grouped by file and sorted by range. A reversed range, or two
/// ranges in one file that overlap, means the backend answer cannot be
/// trusted and the whole result is rejected.
pub fn build_edits(references: &ReferenceSet, new_name: &str) -> RelabelResult<RefactorResult> {
    let mut grouped: BTreeMap<PathBuf, Vec<EditOperation>> = BTreeMap::new();

    for reference in &references.references {
        if !reference.range.is_well_formed() {
            return Err(RelabelError::invariant(format!(
                "reference range {} in {} ends before it starts",
                reference.range,
                reference.path.display()
            )));
        }
        grouped
            .entry(reference.path.clone())
            .or_default()
            .push(EditOperation::new(
                reference.range,
                references.canonical_text.as_str(),
                new_name,
            ));
    }

    for (path, edits) in grouped.iter_mut() {
        edits.sort_by_key(|edit| edit.range);
        if let Some(pair) = edits
            .windows(2)
            .find(|pair| pair[0].range.overlaps(&pair[1].range))
        {
            return Err(RelabelError::invariant(format!(
                "references {} and {} in {} overlap",
                pair[0].range,
                pair[1].range,
                path.display()
            )));
        }
    }

    Ok(RefactorResult::new(grouped))
}
