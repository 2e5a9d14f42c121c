use crate::conf::LogConfigSection;
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";

/// Filter directive in effect: `RUST_LOG`, then the config file, then `warn`.
pub fn filter_directive(config: &LogConfigSection) -> String {
    env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| config.filter.clone())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init(config: &LogConfigSection) {
    let directive = filter_directive(config);
    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}
