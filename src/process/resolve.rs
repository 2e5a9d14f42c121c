//! Executable lookup along `PATH`.

use crate::error::{ShellError, ShellResult};
use nix::unistd::{self, AccessFlags};
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Resolve `program` against the live `PATH` and the current directory.
pub fn resolve(program: &str) -> ShellResult<PathBuf> {
    let path_var = env::var_os("PATH");
    let cwd = env::current_dir().ok();
    resolve_in(program, path_var.as_deref(), cwd.as_deref())
}

/// Resolve `program` against an explicit search path.
///
/// Names containing a `/` are returned untouched. Otherwise every `PATH`
/// directory is tried in listed order, then the working directory, and the
/// first executable regular file wins.
pub fn resolve_in(program: &str, path_var: Option<&OsStr>, cwd: Option<&Path>) -> ShellResult<PathBuf> {
    if program.contains('/') {
        return Ok(PathBuf::from(program));
    }

    candidates(program, path_var, cwd)
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| ShellError::CommandNotFound(program.to_string()))
}

/// Every location `resolve_in` would test, in the order it tests them.
pub fn candidates<'a>(
    program: &'a str,
    path_var: Option<&'a OsStr>,
    cwd: Option<&'a Path>,
) -> impl Iterator<Item = PathBuf> + 'a {
    path_var
        .into_iter()
        .flat_map(|paths| env::split_paths(paths))
        .filter(|dir| !dir.as_os_str().is_empty())
        .chain(cwd.map(Path::to_path_buf))
        .map(move |dir| dir.join(program))
}

fn is_executable(candidate: &Path) -> bool {
    candidate.is_file() && unistd::access(candidate, AccessFlags::X_OK).is_ok()
}
