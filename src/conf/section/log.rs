use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfigSection {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `conch=debug`.
    pub filter: Option<String>,
}
