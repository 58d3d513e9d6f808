use tracing_subscriber::EnvFilter;

/// Installs the global subscriber; `RUST_LOG` overrides `level`
///
/// Records emitted through `log` by the core crate are forwarded as well.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .init();
}
