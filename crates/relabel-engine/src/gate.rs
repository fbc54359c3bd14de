//! Diagnostics gate: refuse to refactor buffers in a doubtful state.

use crate::backend::AnalysisBackend;
use relabel_foundation::BufferHandle;
use std::sync::Arc;
use tracing::{debug, warn};

/// Checks that a buffer's analysis is accurate and free of diagnostics
///
/// Fails closed: missing diagnostics and backend errors count as unsafe.
#[derive(Clone)]
pub struct DiagnosticsGate {
    backend: Arc<dyn AnalysisBackend>,
}

impl DiagnosticsGate {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    pub async fn is_safe(&self, buffer: &BufferHandle) -> bool {
        match self.backend.get_diagnostics(buffer).await {
            Ok(Some(report)) => {
                let safe = report.is_clean();
                if !safe {
                    debug!(
                        buffer = %buffer,
                        accurate = report.accurate_flags,
                        diagnostics = report.diagnostics.len(),
                        "Buffer not safe to refactor"
                    );
                }
                safe
            }
            Ok(None) => {
                debug!(buffer = %buffer, "Backend returned no diagnostics");
                false
            }
            Err(e) => {
                warn!(buffer = %buffer, error = %e, "Diagnostics request failed");
                false
            }
        }
    }
}
