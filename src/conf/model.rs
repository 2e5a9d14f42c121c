use super::section::{ControlConfigSection, LogConfigSection, UiConfigSection};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigurationModel {
    #[serde(default)]
    pub control: ControlConfigSection,
    #[serde(default)]
    pub ui: UiConfigSection,
    #[serde(default)]
    pub log: LogConfigSection,
    #[serde(skip)]
    source_path: Option<PathBuf>,
}

impl ConfigurationModel {
    /// File this configuration was read from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub(crate) fn set_source_path(&mut self, path: PathBuf) {
        self.source_path = Some(path);
    }
}
