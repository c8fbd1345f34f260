//! Tracing and logging setup shared by binaries and tests.

pub mod tracing;

pub use tracing::LogFormat;

/// Initialize process-wide observability from the environment
/// (`RUST_LOG`, `LOG_FORMAT`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
