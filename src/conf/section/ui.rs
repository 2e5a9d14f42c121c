use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptTheme {
    /// Working directory and a status-coloured arrow.
    #[default]
    Path,
    /// `N: ` where N counts processed lines.
    Line,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UiConfigSection {
    pub prompt_theme: Option<String>,
}

impl UiConfigSection {
    pub fn prompt_theme(&self) -> PromptTheme {
        match self.prompt_theme.as_deref() {
            Some("line") => PromptTheme::Line,
            _ => PromptTheme::Path,
        }
    }
}
