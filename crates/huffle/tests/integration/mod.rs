//! Integration tests for the huffle codec.
//!
//! These tests drive the public API end to end: the worked frequency
//! scenarios, byte-stream entry points and rejection of damaged containers.

mod malformed;
mod scenarios;
mod streaming;

/// Route `tracing` output to the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
