use crate::error::ShellResult;
use crate::process::builtin::{Builtin, Invocation};
use tracing::warn;

/// Builtin that lists every registered builtin with its description.
pub struct Help;

impl Builtin for Help {
    /// Always exits successfully after showing the help content. A failed
    /// write is logged and the rest of the listing skipped.
    fn call(&self, invocation: &mut Invocation<'_>, _args: &[String]) -> ShellResult<i32> {
        for entry in invocation.registry.entries() {
            let line = format!("{} - {}", entry.name, entry.description);
            if let Err(err) = invocation.state.write_line(&line) {
                warn!("unable to write help: {err}");
                break;
            }
        }
        Ok(0)
    }
}
