pub mod builders;

use std::sync::Once;

use agdeps::dag::{CircularDependency, DependencyGraph};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Resolve `graph` and render each provider, joined by single spaces.
pub fn resolution_string<T: ToString>(
    graph: &DependencyGraph<T>,
) -> Result<String, CircularDependency> {
    let resolved = graph.resolve()?;
    Ok(resolved
        .iter()
        .map(|node| node.provider().to_string())
        .collect::<Vec<_>>()
        .join(" "))
}
