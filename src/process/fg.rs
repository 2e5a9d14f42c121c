use crate::error::ShellResult;
use crate::jobs::JobState;
use crate::process::builtin::{Builtin, Invocation, operands};
use crate::process::launch::wait_in_foreground;
use nix::sys::signal::{Signal, killpg};
use tracing::debug;

/// `fg [pid]` gives a job the terminal, resumes it and waits for it.
///
/// Without an operand the most recently added job is used. The terminal is
/// only transferred once the target job has been found.
pub struct Fg;

impl Builtin for Fg {
    fn call(&self, invocation: &mut Invocation<'_>, args: &[String]) -> ShellResult<i32> {
        let target = operands(args).first().map(String::as_str);
        let job = invocation.state.jobs().select("fg", target)?;
        let state = &mut *invocation.state;

        state.terminal_mut().set_foreground(job.pgid)?;
        // The table may lag behind the job, so continue it unconditionally.
        if let Err(errno) = killpg(job.pgid, Signal::SIGCONT) {
            debug!(pgid = job.pgid.as_raw(), "unable to continue job: {errno}");
        }
        state.jobs_mut().set_state(job.pid, JobState::Running);
        debug!(pid = job.pid.as_raw(), "job moved to the foreground");

        wait_in_foreground(state, job)
    }
}
