use tracing_subscriber::{prelude::*, EnvFilter, Registry};

/// Logs go to stderr so they do not interleave with the transcript.
pub fn configure_logging() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::time())
        .with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let subscriber = Registry::default().with(filter).with(stderr_log);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {e}");
    }
}
