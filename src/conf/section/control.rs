use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ControlConfigSection {
    /// Print non-zero exit statuses after each command.
    pub report_status: Option<bool>,
    /// Print `[N] PID` when a job is sent to the background.
    pub notify_background: Option<bool>,
}

impl ControlConfigSection {
    pub fn report_status(&self) -> bool {
        self.report_status.unwrap_or(true)
    }

    pub fn notify_background(&self) -> bool {
        self.notify_background.unwrap_or(true)
    }
}
