use nix::errno::Errno;
use std::io;
use thiserror::Error;

/// Status reported when no executable could be resolved.
pub const COMMAND_NOT_FOUND_STATUS: i32 = 127;
/// Status reported when the child could not replace its image.
pub const EXEC_FAILURE_STATUS_REPORTED: i32 = 126;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("cd: {path}: {reason}")]
    Path { path: String, reason: String },
    #[error("command not found: {0}")]
    CommandNotFound(String),
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("{builtin}: no such job: {target}")]
    JobNotFound {
        builtin: &'static str,
        target: String,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("{0}: unable to execute program")]
    ExecFailure(String),
    #[error("system call failed: {0}")]
    Sys(#[from] Errno),
}

impl ShellError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        ShellError::Io {
            context: context.into(),
            source,
        }
    }

    /// Status code the control loop records for this error.
    pub fn status(&self) -> i32 {
        match self {
            ShellError::CommandNotFound(_) => COMMAND_NOT_FOUND_STATUS,
            ShellError::ExecFailure(_) => EXEC_FAILURE_STATUS_REPORTED,
            _ => 1,
        }
    }
}

pub type ShellResult<T> = Result<T, ShellError>;
