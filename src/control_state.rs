//! State machine backing the interactive control loop.

use crate::conf::{ConfigurationModel, PromptTheme};
use crate::error::{ShellError, ShellResult};
use crate::process::{self, builtin::map::BuiltinMap};
use crate::state::ShellState;
use std::env;
use std::io::{self, Write};
use std::path::Path;

/// Signals whether the control loop should continue or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep reading user input.
    Continue,
    /// Terminate the control loop.
    Exit,
}

/// Shared state that backs the interactive control loop.
pub struct ControlState {
    status: i32,
    line_number: usize,
    builtin_map: BuiltinMap,
    shell: ShellState,
    prompt_theme: PromptTheme,
    report_status: bool,
}

impl ControlState {
    /// Build a new control state with the default builtin set.
    pub fn new(shell: ShellState) -> Self {
        Self {
            status: 0,
            line_number: 0,
            builtin_map: BuiltinMap::with_defaults(),
            shell,
            prompt_theme: PromptTheme::default(),
            report_status: true,
        }
    }

    pub fn from_config(mut shell: ShellState, config: &ConfigurationModel) -> Self {
        shell.set_notify_background(config.control.notify_background());
        let mut state = Self::new(shell);
        state.prompt_theme = config.ui.prompt_theme();
        state.report_status = config.control.report_status();
        state
    }

    /// Control state over a non-interactive terminal.
    pub fn headless() -> Self {
        Self::new(ShellState::headless())
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut ShellState {
        &mut self.shell
    }

    /// Status requested by the `exit` builtin, once it has run.
    pub fn exit_code(&self) -> Option<i32> {
        self.shell.exit_request()
    }

    /// Prompt for the next line. Non-interactive shells print none.
    pub fn prompt(&self) -> String {
        if !self.shell.terminal().is_interactive() {
            return String::new();
        }

        match self.prompt_theme {
            PromptTheme::Path => generate_prompt(self.status),
            PromptTheme::Line => format!("{}: ", self.line_number),
        }
    }

    /// Tokenize and run one line, recording its status.
    pub fn run_line(&mut self, line: &str) -> ShellResult<i32> {
        self.line_number += 1;
        let outcome = parse_tokens(line)
            .and_then(|tokens| process::dispatch(&self.builtin_map, &mut self.shell, &tokens));

        self.status = match &outcome {
            Ok(status) => *status,
            Err(err) => err.status(),
        };
        outcome
    }

    /// Run one line and report its outcome to `sink`.
    pub fn handle_line<W: Write + ?Sized>(&mut self, line: &str, sink: &mut W) -> io::Result<ControlFlow> {
        match self.run_line(line) {
            Ok(_) if self.exit_code().is_some() => return Ok(ControlFlow::Exit),
            Ok(0) => {}
            Ok(status) => {
                if self.report_status {
                    writeln!(sink, "conch: exit status {status}")?;
                }
            }
            Err(err) => writeln!(sink, "conch: {err}")?,
        }

        sink.flush()?;
        Ok(ControlFlow::Continue)
    }
}

/// Construct the shell prompt string combining status colouring and the cwd.
fn generate_prompt(status: i32) -> String {
    let red_text = "\u{1b}[31m";
    let green_text = "\u{1b}[32m";
    let purple_text = "\u{1b}[35m";
    let end_color_text = "\u{1b}[39m";

    let cwd = env::current_dir()
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|_| String::from("?"));

    format!(
        "{}{} {}{}{}{} ",
        purple_text,
        update_cwd(&cwd),
        end_color_text,
        if status == 0 { green_text } else { red_text },
        char::from_u32(0x27A3).unwrap_or('>'),
        end_color_text,
    )
}

/// Replace the home directory portion of the cwd with `~` for a compact prompt.
fn update_cwd(cwd: &str) -> String {
    match env::var("HOME") {
        Ok(home) if !home.is_empty() => abbreviate_home(cwd, &home),
        _ => cwd.to_string(),
    }
}

/// Only whole path components are matched, so `/home/user` is not shortened
/// by a home of `/home/u`.
fn abbreviate_home(cwd: &str, home: &str) -> String {
    match Path::new(cwd).strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => String::from("~"),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => cwd.to_string(),
    }
}

/// Use shell-like parsing rules to split the input line into tokens.
fn parse_tokens(line: &str) -> ShellResult<Vec<String>> {
    shlex::split(line).ok_or_else(|| ShellError::Syntax(format!("unbalanced quotes in: {line}")))
}
