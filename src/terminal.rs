//! Controlling-terminal ownership and the shell's job-control signal setup.

use crate::error::{ShellError, ShellResult};
use nix::sys::signal::{self, SigHandler, SigSet, Signal, killpg};
use nix::sys::termios::{self, SetArg, Termios};
use nix::unistd::{self, Pid};
use std::io::{self, IsTerminal};
use std::os::fd::{BorrowedFd, RawFd};
use std::{process, thread};
use tracing::{debug, warn};

/// Keyboard and terminal-access signals the interactive shell ignores for
/// itself. Children get the default disposition back before exec.
const JOB_CONTROL_SIGNALS: [Signal; 5] = [
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGTSTP,
    Signal::SIGTTIN,
    Signal::SIGTTOU,
];

/// Signals that end the shell from outside. An interactive shell takes them
/// on a dedicated thread so the saved modes are put back before it dies.
const HANGUP_SIGNALS: [Signal; 2] = [Signal::SIGHUP, Signal::SIGTERM];

/// The set of [`HANGUP_SIGNALS`].
pub fn hangup_signals() -> SigSet {
    let mut set = SigSet::empty();
    for sig in HANGUP_SIGNALS {
        set.add(sig);
    }
    set
}

/// Owns the shell's view of the controlling terminal.
///
/// Dropping a `Terminal` restores the terminal modes saved at startup, so
/// every exit path that unwinds the shell state leaves the tty as it found it.
pub struct Terminal {
    fd: RawFd,
    interactive: bool,
    shell_pgid: Pid,
    foreground: Pid,
    saved_modes: Option<Termios>,
    write_signal_suppressed: bool,
}

impl Terminal {
    /// Set up job control on standard input.
    ///
    /// When standard input is not a terminal this is equivalent to
    /// [`Terminal::non_interactive`]. Otherwise the shell blocks until its
    /// process group owns the terminal, becomes its own process group leader,
    /// takes the foreground and saves the current terminal modes.
    pub fn init() -> ShellResult<Self> {
        if !io::stdin().is_terminal() {
            debug!("standard input is not a terminal, job control disabled");
            return Ok(Self::non_interactive());
        }

        let fd = libc::STDIN_FILENO;
        let tty = unsafe { BorrowedFd::borrow_raw(fd) };

        wait_until_foreground(tty)?;

        for sig in JOB_CONTROL_SIGNALS {
            unsafe { signal::signal(sig, SigHandler::SigIgn) }?;
        }

        let shell_pgid = unistd::getpid();
        if let Err(errno) = unistd::setpgid(shell_pgid, shell_pgid) {
            // Session leaders already lead their own group.
            debug!("setpgid on shell failed: {errno}");
        }
        unistd::tcsetpgrp(tty, shell_pgid)?;
        let saved_modes = termios::tcgetattr(tty)?;
        spawn_hangup_guard(fd, saved_modes.clone())?;

        debug!(pgid = shell_pgid.as_raw(), "shell owns the terminal");
        Ok(Terminal {
            fd,
            interactive: true,
            shell_pgid,
            foreground: shell_pgid,
            saved_modes: Some(saved_modes),
            write_signal_suppressed: true,
        })
    }

    /// A terminal handle that never touches the tty. Foreground transfers are
    /// only recorded.
    pub fn non_interactive() -> Self {
        let pgid = unistd::getpgrp();
        Terminal {
            fd: libc::STDIN_FILENO,
            interactive: false,
            shell_pgid: pgid,
            foreground: pgid,
            saved_modes: None,
            write_signal_suppressed: false,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn shell_pgid(&self) -> Pid {
        self.shell_pgid
    }

    /// Process group the shell last handed the terminal to.
    pub fn foreground(&self) -> Pid {
        self.foreground
    }

    /// Give the terminal to `pgid`.
    pub fn set_foreground(&mut self, pgid: Pid) -> ShellResult<()> {
        if self.interactive {
            unistd::tcsetpgrp(self.tty(), pgid)?;
            debug!(pgid = pgid.as_raw(), "terminal foreground transferred");
        }
        self.foreground = pgid;
        Ok(())
    }

    /// Take the terminal back for the shell and reinstate its saved modes,
    /// which a foreground job may have changed.
    pub fn reclaim_foreground(&mut self) -> ShellResult<()> {
        self.set_foreground(self.shell_pgid)?;
        if let (true, Some(modes)) = (self.interactive, self.saved_modes.as_ref()) {
            termios::tcsetattr(self.tty(), SetArg::TCSADRAIN, modes)?;
        }
        Ok(())
    }

    /// Ignore SIGTTOU in the shell so that terminal writes and `tcsetpgrp`
    /// calls made while a child holds the foreground cannot stop it.
    pub fn suppress_background_write_signal(&mut self) -> ShellResult<()> {
        if !self.write_signal_suppressed {
            unsafe { signal::signal(Signal::SIGTTOU, SigHandler::SigIgn) }?;
            self.write_signal_suppressed = true;
        }
        Ok(())
    }

    /// Restore the terminal modes saved by [`Terminal::init`].
    pub fn restore(&mut self) -> ShellResult<()> {
        if let (true, Some(modes)) = (self.interactive, self.saved_modes.as_ref()) {
            termios::tcsetattr(self.tty(), SetArg::TCSADRAIN, modes)?;
        }
        Ok(())
    }

    /// Job-control setup performed in a freshly forked child: lead a new
    /// process group, take the terminal when running in the foreground and
    /// return the shell's ignored signals to their defaults.
    ///
    /// Only async-signal-safe calls are made here. Failures are ignored since
    /// the child has no channel to report them besides its exit status.
    pub(crate) fn enter_child(&self, foreground: bool) {
        let pid = unistd::getpid();
        let _ = unistd::setpgid(pid, pid);
        if foreground && self.interactive {
            let _ = unistd::tcsetpgrp(self.tty(), pid);
        }
        for sig in JOB_CONTROL_SIGNALS.iter().copied().chain([Signal::SIGCHLD]) {
            let _ = unsafe { signal::signal(sig, SigHandler::SigDfl) };
        }
        let _ = hangup_signals().thread_unblock();
    }

    fn tty(&self) -> BorrowedFd<'_> {
        // Standard input stays open for the life of the shell.
        unsafe { BorrowedFd::borrow_raw(self.fd) }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("unable to restore terminal modes: {err}");
        }
    }
}

/// Block [`HANGUP_SIGNALS`] on the calling thread (and every thread or child
/// forked from it later) and start a thread that waits for them. On receipt it
/// restores `modes` and dies from the same signal.
fn spawn_hangup_guard(fd: RawFd, modes: Termios) -> ShellResult<()> {
    let hangup = hangup_signals();
    hangup.thread_block()?;

    thread::Builder::new()
        .name(String::from("hangup-guard"))
        .spawn(move || {
            let Ok(sig) = hangup.wait() else {
                return;
            };
            debug!("received {sig}, restoring terminal modes");
            let tty = unsafe { BorrowedFd::borrow_raw(fd) };
            if let Err(errno) = termios::tcsetattr(tty, SetArg::TCSADRAIN, &modes) {
                warn!("unable to restore terminal modes: {errno}");
            }

            let _ = unsafe { signal::signal(sig, SigHandler::SigDfl) };
            let _ = hangup.thread_unblock();
            let _ = signal::raise(sig);
            process::exit(128 + sig as i32);
        })
        .map_err(|err| ShellError::io("unable to start the hangup guard", err))?;
    Ok(())
}

/// Block until the shell's process group is the terminal's foreground group.
///
/// Each round stops the group with SIGTTIN and sleeps in `sigwait` until the
/// SIGCONT that resumes it, then checks ownership again.
fn wait_until_foreground(tty: BorrowedFd<'_>) -> ShellResult<()> {
    let mut continued = SigSet::empty();
    continued.add(Signal::SIGCONT);
    continued.thread_block()?;

    let outcome = stop_until_foreground(tty, &continued);
    continued.thread_unblock()?;
    outcome
}

fn stop_until_foreground(tty: BorrowedFd<'_>, continued: &SigSet) -> ShellResult<()> {
    unsafe { signal::signal(Signal::SIGTTIN, SigHandler::SigDfl) }?;
    loop {
        let pgrp = unistd::getpgrp();
        if unistd::tcgetpgrp(tty)? == pgrp {
            return Ok(());
        }
        debug!(pgid = pgrp.as_raw(), "shell is in the background, stopping until continued");
        killpg(pgrp, Signal::SIGTTIN)?;
        continued.wait()?;
    }
}
