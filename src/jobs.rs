//! Bookkeeping for background and stopped commands.

use crate::error::{ShellError, ShellResult};
use nix::unistd::Pid;
use std::fmt;

/// Last lifecycle state observed for a job.
///
/// `Exited` marks a job whose exit has been seen but not yet collected; the
/// process stays a zombie until `wait` or `fg` reaps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Stopped,
    Exited,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobState::Running => "Running",
            JobState::Stopped => "Stopped",
            JobState::Exited => "Exited",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub pid: Pid,
    pub pgid: Pid,
    pub state: JobState,
    pub command: String,
}

impl Job {
    pub fn new(pid: Pid, pgid: Pid, state: JobState, command: impl Into<String>) -> Self {
        Job {
            pid,
            pgid,
            state,
            command: command.into(),
        }
    }
}

/// Jobs keyed by process id, kept in insertion order.
///
/// Entries are only removed by explicit reaping, so a job that has already
/// exited stays listed (with its last observed state) until `wait` or `fg`
/// collects it.
#[derive(Debug, Default)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    pub fn new() -> Self {
        JobTable { jobs: Vec::new() }
    }

    /// Track a job. A stale entry with the same pid is replaced and the new
    /// record moves to the most-recent position.
    pub fn insert(&mut self, job: Job) {
        self.jobs.retain(|tracked| tracked.pid != job.pid);
        self.jobs.push(job);
    }

    pub fn remove(&mut self, pid: Pid) -> Option<Job> {
        let index = self.jobs.iter().position(|job| job.pid == pid)?;
        Some(self.jobs.remove(index))
    }

    pub fn get(&self, pid: Pid) -> Option<&Job> {
        self.jobs.iter().find(|job| job.pid == pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.get(pid).is_some()
    }

    pub fn set_state(&mut self, pid: Pid, state: JobState) -> bool {
        match self.jobs.iter_mut().find(|job| job.pid == pid) {
            Some(job) => {
                job.state = state;
                true
            }
            None => false,
        }
    }

    /// Job number shown in notices and listings, counting from 1.
    pub fn number(&self, pid: Pid) -> Option<usize> {
        self.jobs.iter().position(|job| job.pid == pid).map(|index| index + 1)
    }

    pub fn most_recent(&self) -> Option<&Job> {
        self.jobs.last()
    }

    /// Pick the job a `fg`/`bg` invocation refers to: the most recent job when
    /// no target is given, otherwise the tracked job with that process id.
    pub fn select(&self, builtin: &'static str, target: Option<&str>) -> ShellResult<Job> {
        let not_found = |target: &str| ShellError::JobNotFound {
            builtin,
            target: target.to_string(),
        };

        let job = match target {
            None => self.most_recent().ok_or_else(|| not_found("current"))?,
            Some(raw) => {
                let pid = raw.parse::<i32>().map_err(|_| not_found(raw))?;
                self.get(Pid::from_raw(pid)).ok_or_else(|| not_found(raw))?
            }
        };

        Ok(job.clone())
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.jobs.iter().map(|job| job.pid).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
