use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Handle to a text buffer understood by the analysis backend.
///
/// `id` is whatever the backend uses to find its analysis of the buffer. A
/// buffer that was never saved has no `path`; such buffers are never offered
/// a refactor, because results are keyed by file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferHandle {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl BufferHandle {
    /// Handle for a buffer backed by a file; the path doubles as the id
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: path.display().to_string(),
            path: Some(path),
        }
    }

    /// Handle for an unsaved buffer
    pub fn untitled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl fmt::Display for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
