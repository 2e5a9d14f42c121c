use crate::error::{ShellError, ShellResult};
use crate::jobs::JobState;
use crate::process::builtin::{Builtin, Invocation, operands};
use nix::sys::signal::{Signal, killpg};
use tracing::debug;

/// `bg [pid]` resumes a job without giving it the terminal.
pub struct Bg;

impl Builtin for Bg {
    fn call(&self, invocation: &mut Invocation<'_>, args: &[String]) -> ShellResult<i32> {
        let target = operands(args).first().map(String::as_str);
        let job = invocation.state.jobs().select("bg", target)?;

        if job.state == JobState::Exited {
            debug!(pid = job.pid.as_raw(), "job already exited, nothing to resume");
            return Ok(0);
        }

        killpg(job.pgid, Signal::SIGCONT)?;
        invocation.state.jobs_mut().set_state(job.pid, JobState::Running);

        if invocation.state.notify_background() {
            let number = invocation.state.jobs().number(job.pid).unwrap_or_default();
            let line = format!("[{}] {} {} &", number, job.pid, job.command);
            invocation
                .state
                .write_line(&line)
                .map_err(|err| ShellError::io("bg", err))?;
        }
        Ok(0)
    }
}
