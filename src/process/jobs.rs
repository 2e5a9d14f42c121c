use crate::error::{ShellError, ShellResult};
use crate::jobs::JobState;
use crate::process::builtin::{Builtin, Invocation};
use crate::process::launch::has_exited;

/// `jobs` lists tracked jobs with the last state the shell observed.
///
/// Jobs that have exited since the last look are marked `Exited` but left
/// for `wait` or `fg` to reap.
pub struct Jobs;

impl Builtin for Jobs {
    fn call(&self, invocation: &mut Invocation<'_>, _args: &[String]) -> ShellResult<i32> {
        let table = invocation.state.jobs_mut();
        let finished: Vec<_> = table
            .iter()
            .filter(|job| job.state != JobState::Exited && has_exited(job.pid))
            .map(|job| job.pid)
            .collect();
        for pid in finished {
            table.set_state(pid, JobState::Exited);
        }

        let lines: Vec<String> = table
            .iter()
            .enumerate()
            .map(|(index, job)| format!("[{}] {} {} {}", index + 1, job.pid, job.state, job.command))
            .collect();

        for line in lines {
            invocation
                .state
                .write_line(&line)
                .map_err(|err| ShellError::io("jobs", err))?;
        }
        Ok(0)
    }
}
