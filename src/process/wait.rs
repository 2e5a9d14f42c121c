use crate::error::{ShellError, ShellResult};
use crate::process::builtin::{Builtin, Invocation};
use crate::process::launch::wait_for;
use nix::errno::Errno;
use nix::sys::wait::WaitStatus;
use tracing::debug;

/// `wait` blocks until every tracked job has exited, reaping each one.
pub struct Wait;

impl Builtin for Wait {
    fn call(&self, invocation: &mut Invocation<'_>, _args: &[String]) -> ShellResult<i32> {
        let jobs = invocation.state.jobs_mut();

        for pid in jobs.pids() {
            match wait_for(pid, false) {
                Ok(WaitStatus::Exited(..) | WaitStatus::Signaled(..)) => {
                    jobs.remove(pid);
                    debug!(pid = pid.as_raw(), "reaped job");
                }
                Ok(_) => {}
                Err(ShellError::Sys(Errno::ECHILD)) => {
                    // Already collected elsewhere; nothing left to wait for.
                    jobs.remove(pid);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(0)
    }
}
