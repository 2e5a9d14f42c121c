use conch::{conf, control, logging};
use std::process;
use tracing::{debug, warn};

/// Entry point that starts the control loop.
fn main() {
    let loaded = conf::load();
    let config = loaded.as_ref().ok().cloned().unwrap_or_default();
    logging::init(&config.log);

    match &loaded {
        Ok(cfg) => {
            if let Some(path) = cfg.source_path() {
                debug!("loaded configuration from {}", path.display());
            }
        }
        Err(err) => warn!("{err}; using defaults"),
    }

    let code = match control::control_loop(&config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("conch: {err}");
            1
        }
    };

    process::exit(code);
}
