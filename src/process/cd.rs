use crate::error::{ShellError, ShellResult};
use crate::process::builtin::{Builtin, Invocation, operands};
use std::env;
use std::path::PathBuf;

/// `cd [dir]` changes the working directory, defaulting to `$HOME`.
///
/// On failure the working directory is left untouched.
pub struct Cd;

impl Builtin for Cd {
    fn call(&self, _invocation: &mut Invocation<'_>, args: &[String]) -> ShellResult<i32> {
        let target = match operands(args) {
            [] => env::var_os("HOME").map(PathBuf::from).ok_or_else(|| ShellError::Path {
                path: String::from("~"),
                reason: String::from("HOME not set"),
            })?,
            [dir] => PathBuf::from(dir),
            _ => {
                return Err(ShellError::Path {
                    path: args[1..].join(" "),
                    reason: String::from("too many arguments"),
                });
            }
        };

        env::set_current_dir(&target).map_err(|err| ShellError::Path {
            path: target.to_string_lossy().into_owned(),
            reason: err.to_string(),
        })?;
        Ok(0)
    }
}
