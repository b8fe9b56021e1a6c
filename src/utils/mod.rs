pub mod atomic_write;
pub mod build_info;
pub mod paths;

/// Installs the global tracing subscriber, logging to stderr.
///
/// Call through [`crate::init`], which guards this with a `Once`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("expense_tracker=warn"));

    // A subscriber installed by the host process takes precedence.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
