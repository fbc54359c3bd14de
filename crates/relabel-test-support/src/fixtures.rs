//! Recorded backend answers for the canonical rename scenarios.
//!
//! Every scenario describes the same buffer:
//!
//! ```c
//! int sum(int n) {
//!   int total = 0;
//!   int x = n;
//!   for (int i = 0; i < n; i++)
//!     total += i;
//!   total += x;
//!   return total;
//! }
//! ```
//!
//! with the cursor on the declaration of `x` at row 2, column 6, and the
//! second reference at row 5, column 11. Rows and columns are zero-based.

use lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};
use relabel_engine::{BackendSnapshot, SnapshotBackend};
use relabel_foundation::protocol::{DeclarationInfo, DiagnosticsReport, LocalReferences};
use relabel_foundation::{BufferHandle, SourcePosition, SourceRange};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const SOURCE: &str = "int sum(int n) {\n  int total = 0;\n  int x = n;\n  for (int i = 0; i < n; i++)\n    total += i;\n  total += x;\n  return total;\n}\n";

pub const SOURCE_PATH: &str = "/workspace/src/sum.c";

pub const CURSOR: SourcePosition = SourcePosition::new(2, 6);

pub const DECLARATION: SourceRange = SourceRange::from_coords((2, 6), (2, 7));

pub const USE: SourceRange = SourceRange::from_coords((5, 11), (5, 12));

/// A buffer plus the backend answers recorded for it
#[derive(Debug, Clone)]
pub struct Scenario {
    pub buffer: BufferHandle,
    pub cursor: SourcePosition,
    pub snapshot: BackendSnapshot,
}

impl Scenario {
    pub fn backend(&self) -> Arc<SnapshotBackend> {
        Arc::new(SnapshotBackend::new(self.snapshot.clone()))
    }

    /// Write the snapshot to a temporary JSON file
    pub fn write_snapshot(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create snapshot file");
        let json = serde_json::to_string_pretty(&self.snapshot).expect("serialize snapshot");
        file.write_all(json.as_bytes()).expect("write snapshot file");
        file
    }
}

pub fn declaration(name: &str, tag: &str, extent: SourceRange) -> DeclarationInfo {
    DeclarationInfo {
        name: name.to_string(),
        kind_tag: tag.to_string(),
        extent,
    }
}

pub fn references_to(name: &str, ranges: Vec<SourceRange>) -> LocalReferences {
    LocalReferences {
        references: ranges,
        cursor_name: name.to_string(),
    }
}

/// An error-severity diagnostic on the given row
pub fn error_diagnostic(row: u32, message: &str) -> Diagnostic {
    Diagnostic {
        range: Range::new(Position::new(row, 0), Position::new(row, 1)),
        severity: Some(DiagnosticSeverity::ERROR),
        message: message.to_string(),
        ..Default::default()
    }
}

/// Clean buffer, variable `x` with two references
pub fn scenario_a() -> Scenario {
    Scenario {
        buffer: BufferHandle::for_path(SOURCE_PATH),
        cursor: CURSOR,
        snapshot: BackendSnapshot::default()
            .with_diagnostics(DiagnosticsReport::clean())
            .with_declarations(CURSOR, Some(vec![declaration("x", "VAR_DECL", DECLARATION)]))
            .with_references(CURSOR, Some(references_to("x", vec![DECLARATION, USE]))),
    }
}

/// Scenario A with one error diagnostic
pub fn scenario_b() -> Scenario {
    let mut scenario = scenario_a();
    scenario.snapshot.diagnostics = Some(DiagnosticsReport {
        accurate_flags: true,
        diagnostics: vec![error_diagnostic(6, "expected ';' after return statement")],
    });
    scenario
}

/// The declaration under the cursor is a function
pub fn scenario_c() -> Scenario {
    let mut scenario = scenario_a();
    scenario.snapshot.declarations = Vec::new();
    scenario.snapshot = scenario.snapshot.with_declarations(
        CURSOR,
        Some(vec![declaration(
            "sum",
            "FUNCTION_DECL",
            SourceRange::from_coords((0, 4), (0, 7)),
        )]),
    );
    scenario
}

/// The backend cannot resolve references
pub fn scenario_d() -> Scenario {
    let mut scenario = scenario_a();
    scenario.snapshot.references = Vec::new();
    scenario.snapshot = scenario.snapshot.with_references(CURSOR, None);
    scenario
}
