use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

const MAX_LEVEL: Level = Level::INFO;
const DEFAULT_FILTER: &str = "info";

pub fn configure_logging() {
    let stdout_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::time())
        .map_writer(|x| x.with_max_level(MAX_LEVEL));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let subscriber = Registry::default().with(filter).with(stdout_log);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {e}");
    }
}

#[cfg(test)]
mod tests {
    use tracing::metadata::LevelFilter;

    use super::*;

    #[test]
    fn default_filter_stays_within_writer_level() {
        let hint = EnvFilter::new(DEFAULT_FILTER).max_level_hint();

        assert_eq!(Some(LevelFilter::from_level(MAX_LEVEL)), hint);
    }
}
