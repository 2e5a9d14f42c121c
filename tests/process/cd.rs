use super::support::{CwdGuard, Harness, canonical_path, lock_env};
use conch::ShellError;
use std::env;
use std::fs;

#[test]
fn cd_changes_into_existing_directory() {
    let _guard = lock_env();
    let _cwd = CwdGuard::new();
    let temp_dir = tempfile::tempdir().unwrap();
    let target = temp_dir.path().join("project");
    fs::create_dir_all(&target).unwrap();

    let mut shell = Harness::new();
    assert_eq!(shell.run(&["cd", target.to_str().unwrap()]).unwrap(), 0);
    assert_eq!(canonical_path(&env::current_dir().unwrap()), canonical_path(&target));
}

#[test]
fn cd_to_missing_directory_fails_and_keeps_cwd() {
    let _guard = lock_env();
    let _cwd = CwdGuard::new();
    let before = env::current_dir().unwrap();

    let mut shell = Harness::new();
    let err = shell.run(&["cd", "/no/such/dir"]).unwrap_err();

    assert!(matches!(err, ShellError::Path { ref path, .. } if path == "/no/such/dir"));
    assert_eq!(err.status(), 1);
    assert_eq!(env::current_dir().unwrap(), before);
}

#[test]
fn cd_without_operand_uses_home() {
    let _guard = lock_env();
    let _cwd = CwdGuard::new();
    let temp_dir = tempfile::tempdir().unwrap();
    let saved_home = env::var_os("HOME");
    unsafe {
        env::set_var("HOME", temp_dir.path());
    }

    let mut shell = Harness::new();
    let result = shell.run(&["cd"]);

    unsafe {
        match saved_home {
            Some(home) => env::set_var("HOME", home),
            None => env::remove_var("HOME"),
        }
    }
    assert_eq!(result.unwrap(), 0);
    assert_eq!(
        canonical_path(&env::current_dir().unwrap()),
        canonical_path(temp_dir.path())
    );
}

#[test]
fn cd_rejects_extra_operands() {
    let _guard = lock_env();
    let before = env::current_dir().unwrap();

    let mut shell = Harness::new();
    assert!(matches!(shell.run(&["cd", "/tmp", "/var"]), Err(ShellError::Path { .. })));
    assert_eq!(env::current_dir().unwrap(), before);
}
