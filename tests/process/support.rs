#![allow(dead_code)]

use conch::ShellResult;
use conch::process::builtin::map::BuiltinMap;
use conch::process::dispatch;
use conch::state::ShellState;
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Serialize tests that touch the working directory or environment.
pub fn lock_env<'a>() -> MutexGuard<'a, ()> {
    match ENV_LOCK.lock() {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}

/// Restores the working directory when dropped.
pub struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    pub fn new() -> Self {
        Self {
            original_dir: env::current_dir().unwrap(),
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        env::set_current_dir(&self.original_dir).ok();
    }
}

/// A headless shell whose builtin output lands in the returned buffer.
pub struct Harness {
    pub builtins: BuiltinMap,
    pub state: ShellState,
    pub output: Rc<RefCell<Vec<u8>>>,
}

impl Harness {
    pub fn new() -> Self {
        let mut state = ShellState::headless();
        let output = Rc::new(RefCell::new(Vec::new()));
        state.capture_output_buffer(output.clone());
        Self {
            builtins: BuiltinMap::with_defaults(),
            state,
            output,
        }
    }

    pub fn run(&mut self, words: &[&str]) -> ShellResult<i32> {
        let tokens = tokens(words);
        dispatch(&self.builtins, &mut self.state, &tokens)
    }

    pub fn output(&self) -> String {
        String::from_utf8(self.output.borrow().clone()).unwrap()
    }
}

pub fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

pub fn write_script(path: &Path, body: &str, mode: u32) {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

pub fn canonical_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
