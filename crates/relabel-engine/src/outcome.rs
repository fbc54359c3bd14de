//! Result of one pipeline stage.

use serde::Serialize;
use std::fmt;

/// Why no refactor is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotApplicable {
    /// The buffer has no file path to key edits by
    NoPath,
    /// Diagnostics present, analysis inaccurate, or diagnostics unavailable
    Unsafe,
    /// The replacement name is not an acceptable identifier
    InvalidName,
    /// No declaration at the position
    NoSymbol,
    /// The declaration is neither a variable nor a parameter
    UnsupportedKind,
    /// The backend could not resolve references
    NoReferences,
    /// The backend's reference set disagrees with the located symbol
    InconsistentReferences,
    /// A backend call failed
    BackendUnavailable,
}

impl fmt::Display for NotApplicable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NotApplicable::NoPath => "buffer has no file path",
            NotApplicable::Unsafe => "buffer has diagnostics or an inaccurate analysis",
            NotApplicable::InvalidName => "new name is not a valid identifier",
            NotApplicable::NoSymbol => "no declaration at position",
            NotApplicable::UnsupportedKind => "only variables and parameters can be renamed",
            NotApplicable::NoReferences => "references could not be resolved",
            NotApplicable::InconsistentReferences => "references disagree with the declaration",
            NotApplicable::BackendUnavailable => "analysis backend request failed",
        };
        f.write_str(text)
    }
}

/// Either a definite value or the reason the pipeline stops here
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    Ready(T),
    NotApplicable(NotApplicable),
}

impl<T> StageOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, StageOutcome::Ready(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            StageOutcome::Ready(value) => Some(value),
            StageOutcome::NotApplicable(_) => None,
        }
    }

    pub fn reason(&self) -> Option<NotApplicable> {
        match self {
            StageOutcome::Ready(_) => None,
            StageOutcome::NotApplicable(reason) => Some(*reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StageOutcome<U> {
        match self {
            StageOutcome::Ready(value) => StageOutcome::Ready(f(value)),
            StageOutcome::NotApplicable(reason) => StageOutcome::NotApplicable(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_helpers() {
        let ready: StageOutcome<u32> = StageOutcome::Ready(3);
        assert!(ready.is_ready());
        assert_eq!(ready.clone().map(|v| v * 2).into_option(), Some(6));
        assert_eq!(ready.reason(), None);

        let stopped: StageOutcome<u32> = StageOutcome::NotApplicable(NotApplicable::NoSymbol);
        assert!(!stopped.is_ready());
        assert_eq!(stopped.reason(), Some(NotApplicable::NoSymbol));
        assert_eq!(stopped.into_option(), None);
    }
}
