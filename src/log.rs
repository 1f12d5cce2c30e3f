use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout is kept for progress and the summary.
pub(crate) fn set(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(env_filter)))
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .init();
}
