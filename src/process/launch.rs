//! Launching external programs in their own process groups.

use super::redirect::{OpenedRedirection, RedirectionSpec};
use super::resolve::resolve;
use crate::error::{ShellError, ShellResult};
use crate::jobs::{Job, JobState};
use crate::state::ShellState;
use crate::terminal::Terminal;
use nix::errno::Errno;
use nix::sys::wait::{Id, WaitPidFlag, WaitStatus, waitid, waitpid};
use nix::unistd::{self, ForkResult, Pid};
use std::ffi::CString;
use std::os::fd::AsRawFd;
use std::os::raw::c_char;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use std::ptr;
use tracing::debug;

pub const BACKGROUND_MARKER: &str = "&";
pub const INPUT_REDIRECT: &str = "<";
pub const OUTPUT_REDIRECT: &str = ">";

/// Exit status a child uses to report that `execv` failed.
///
/// 199 sits above the `128 + signal` range (at most 192 on Linux), outside
/// the sysexits codes (64-78) and away from the shell conventions 126/127.
pub const EXEC_FAILURE_STATUS: i32 = 199;

/// A command line split into its argument vector and launch options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub argv: Vec<String>,
    pub redirection: RedirectionSpec,
    pub background: bool,
}

impl CommandLine {
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Strip redirections and the trailing background marker from `tokens`.
pub fn build_argv(tokens: &[String]) -> ShellResult<CommandLine> {
    let (body, background) = match tokens.split_last() {
        Some((last, init)) if last == BACKGROUND_MARKER => (init, true),
        _ => (tokens, false),
    };

    let mut argv = Vec::with_capacity(body.len());
    let mut redirection = RedirectionSpec::default();
    let mut iter = body.iter();

    while let Some(token) = iter.next() {
        match token.as_str() {
            INPUT_REDIRECT => {
                let file = redirect_target(INPUT_REDIRECT, iter.next())?;
                if redirection.input.replace(file).is_some() {
                    return Err(ShellError::Syntax("more than one input redirection".into()));
                }
            }
            OUTPUT_REDIRECT => {
                let file = redirect_target(OUTPUT_REDIRECT, iter.next())?;
                if redirection.output.replace(file).is_some() {
                    return Err(ShellError::Syntax("more than one output redirection".into()));
                }
            }
            BACKGROUND_MARKER => {
                return Err(ShellError::Syntax(
                    "`&` is only allowed at the end of a command".into(),
                ));
            }
            _ => argv.push(token.clone()),
        }
    }

    if argv.is_empty() {
        return Err(ShellError::Syntax("missing command name".into()));
    }

    Ok(CommandLine {
        argv,
        redirection,
        background,
    })
}

fn redirect_target(operator: &str, next: Option<&String>) -> ShellResult<PathBuf> {
    match next.map(String::as_str) {
        Some(INPUT_REDIRECT | OUTPUT_REDIRECT | BACKGROUND_MARKER) | None => Err(
            ShellError::Syntax(format!("expected a file name after `{operator}`")),
        ),
        Some(file) => Ok(PathBuf::from(file)),
    }
}

/// Fork and exec `command`.
///
/// Background launches are recorded in the job table and return 0 at once.
/// Foreground launches hold the terminal until the child exits or stops.
pub fn launch(state: &mut ShellState, command: &CommandLine) -> ShellResult<i32> {
    let executable = resolve(command.program())?;
    let files = command.redirection.open()?;

    let path = CString::new(executable.as_os_str().as_bytes())
        .map_err(|_| ShellError::Syntax("program path contains a NUL byte".into()))?;
    let args = command
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ShellError::Syntax("argument contains a NUL byte".into()))?;
    let mut arg_ptrs: Vec<*const c_char> = args.iter().map(|arg| arg.as_ptr()).collect();
    arg_ptrs.push(ptr::null());

    state.terminal_mut().suppress_background_write_signal()?;
    let foreground = !command.background;

    let child = match unsafe { unistd::fork() }? {
        ForkResult::Child => exec_child(state.terminal(), foreground, &files, &path, &arg_ptrs),
        ForkResult::Parent { child } => child,
    };
    drop(files);

    // Also set from the parent so the group exists whichever side runs first.
    if let Err(errno) = unistd::setpgid(child, child) {
        debug!("setpgid from parent failed: {errno}");
    }
    debug!(pid = child.as_raw(), program = %executable.display(), foreground, "launched");

    let job = Job::new(child, child, JobState::Running, command.display());
    if command.background {
        let pid = job.pid;
        state.jobs_mut().insert(job);
        if state.notify_background() {
            let number = state.jobs().number(pid).unwrap_or_else(|| state.jobs().len());
            let line = format!("[{number}] {pid}");
            state
                .write_line(&line)
                .map_err(|err| ShellError::io("unable to write job notice", err))?;
        }
        return Ok(0);
    }

    if let Err(errno) = state.terminal_mut().set_foreground(child) {
        debug!("terminal transfer from parent failed: {errno}");
    }
    wait_in_foreground(state, job)
}

/// Runs in the forked child and never returns. No allocation happens here.
fn exec_child(
    terminal: &Terminal,
    foreground: bool,
    files: &OpenedRedirection,
    path: &CString,
    arg_ptrs: &[*const c_char],
) -> ! {
    terminal.enter_child(foreground);

    let bindings = [
        (files.input.as_ref(), libc::STDIN_FILENO),
        (files.output.as_ref(), libc::STDOUT_FILENO),
    ];
    for (file, target) in bindings {
        if let Some(file) = file {
            if unsafe { libc::dup2(file.as_raw_fd(), target) } < 0 {
                unsafe { libc::_exit(EXEC_FAILURE_STATUS) };
            }
        }
    }

    unsafe {
        libc::execv(path.as_ptr(), arg_ptrs.as_ptr());
        libc::_exit(EXEC_FAILURE_STATUS)
    }
}

/// Block until `pid` exits or stops, restarting on EINTR.
pub(crate) fn wait_for(pid: Pid, untraced: bool) -> ShellResult<WaitStatus> {
    let flags = untraced.then_some(WaitPidFlag::WUNTRACED);
    loop {
        match waitpid(pid, flags) {
            Ok(status @ (WaitStatus::Exited(..) | WaitStatus::Signaled(..) | WaitStatus::Stopped(..))) => {
                return Ok(status);
            }
            Ok(_) | Err(Errno::EINTR) => continue,
            Err(errno) => return Err(errno.into()),
        }
    }
}

/// Whether `pid` has exited or been killed, checked without reaping it so a
/// later `wait` or `fg` still collects the status.
pub(crate) fn has_exited(pid: Pid) -> bool {
    let flags = WaitPidFlag::WEXITED | WaitPidFlag::WNOHANG | WaitPidFlag::WNOWAIT;
    matches!(
        waitid(Id::Pid(pid), flags),
        Ok(WaitStatus::Exited(..) | WaitStatus::Signaled(..))
    )
}

/// Wait for a job that currently holds the terminal, then give the terminal
/// back to the shell.
///
/// A stopped job is (re)recorded as Stopped; an exited job is reaped from the
/// table. The exec failure status is reported as an error.
pub(crate) fn wait_in_foreground(state: &mut ShellState, job: Job) -> ShellResult<i32> {
    let observed = wait_for(job.pid, true);
    let reclaimed = state.terminal_mut().reclaim_foreground();

    let observed = match observed {
        Ok(status) => status,
        Err(err) => {
            state.jobs_mut().remove(job.pid);
            return Err(err);
        }
    };
    reclaimed?;

    match observed {
        WaitStatus::Stopped(pid, sig) => {
            debug!(pid = pid.as_raw(), "foreground job stopped");
            let line = format!("[{}] Stopped\t{}", pid, job.command);
            state.jobs_mut().insert(Job {
                state: JobState::Stopped,
                ..job
            });
            state
                .write_line(&line)
                .map_err(|err| ShellError::io("unable to write job notice", err))?;
            Ok(128 + sig as i32)
        }
        WaitStatus::Exited(pid, code) => {
            state.jobs_mut().remove(pid);
            if code == EXEC_FAILURE_STATUS {
                let program = job.command.split(' ').next().unwrap_or_default();
                return Err(ShellError::ExecFailure(program.to_string()));
            }
            Ok(code)
        }
        WaitStatus::Signaled(pid, sig, _) => {
            state.jobs_mut().remove(pid);
            Ok(128 + sig as i32)
        }
        _ => Ok(0),
    }
}
