mod control;
mod log;
mod ui;

pub use control::ControlConfigSection;
pub use log::LogConfigSection;
pub use ui::{PromptTheme, UiConfigSection};
