//! Standard input/output redirection for launched programs.

use crate::error::{ShellError, ShellResult};
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;

/// Permission bits for files created by output redirection, before umask.
pub const OUTPUT_FILE_MODE: u32 = 0o644;

/// Files a command's standard input and output are rebound to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectionSpec {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Redirection targets opened and ready to be installed in a child.
#[derive(Debug, Default)]
pub(crate) struct OpenedRedirection {
    pub input: Option<File>,
    pub output: Option<File>,
}

impl RedirectionSpec {
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.output.is_none()
    }

    /// Open the input read-only and the output write/create/truncate.
    pub(crate) fn open(&self) -> ShellResult<OpenedRedirection> {
        let input = match &self.input {
            Some(path) => Some(File::open(path).map_err(|err| {
                ShellError::io(format!("unable to open {} for reading", path.display()), err)
            })?),
            None => None,
        };

        let output = match &self.output {
            Some(path) => Some(
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .mode(OUTPUT_FILE_MODE)
                    .open(path)
                    .map_err(|err| {
                        ShellError::io(format!("unable to open {} for writing", path.display()), err)
                    })?,
            ),
            None => None,
        };

        Ok(OpenedRedirection { input, output })
    }
}
