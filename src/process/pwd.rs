use crate::error::{ShellError, ShellResult};
use crate::process::builtin::{Builtin, Invocation};
use std::env;

/// The `pwd` builtin writes the absolute pathname of the current working
/// directory to standard output.
///
/// Operands are ignored. Fails when the working directory cannot be read,
/// e.g. after it was removed from under the shell.
pub struct Pwd;

impl Builtin for Pwd {
    fn call(&self, invocation: &mut Invocation<'_>, _args: &[String]) -> ShellResult<i32> {
        let cwd = env::current_dir()
            .map_err(|err| ShellError::io("pwd: unable to read the working directory", err))?;

        invocation
            .state
            .write_line(&cwd.to_string_lossy())
            .map_err(|err| ShellError::io("pwd", err))?;
        Ok(0)
    }
}
