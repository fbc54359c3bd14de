//! Test support utilities and fixtures for relabel tests

pub mod fixtures;
pub mod mocks;

pub use fixtures::{scenario_a, scenario_b, scenario_c, scenario_d, Scenario};
pub use mocks::MockBackend;

/// Get the path to test fixtures directory
pub fn fixtures_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}
