use super::support::{lock_env, write_script};
use conch::ShellError;
use conch::process::resolve::{resolve, resolve_in};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

const SCRIPT: &str = "#!/bin/sh\nexit 0\n";

fn search_path<P: AsRef<Path>>(dirs: &[P]) -> OsString {
    env::join_paths(dirs.iter().map(|dir| dir.as_ref())).unwrap()
}

#[test]
fn earlier_path_entry_wins() {
    let root = tempfile::tempdir().unwrap();
    let first = root.path().join("first");
    let second = root.path().join("second");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();
    write_script(&first.join("tool"), SCRIPT, 0o755);
    write_script(&second.join("tool"), SCRIPT, 0o755);

    let path_var = search_path(&[&first, &second]);
    let resolved = resolve_in("tool", Some(path_var.as_os_str()), Some(root.path())).unwrap();
    assert_eq!(resolved, first.join("tool"));

    let path_var = search_path(&[&second, &first]);
    let resolved = resolve_in("tool", Some(path_var.as_os_str()), Some(root.path())).unwrap();
    assert_eq!(resolved, second.join("tool"));
}

#[test]
fn non_executable_entries_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    let first = root.path().join("first");
    let second = root.path().join("second");
    fs::create_dir_all(first.join("tool")).unwrap();
    fs::create_dir_all(&second).unwrap();
    write_script(&second.join("tool"), SCRIPT, 0o755);
    write_script(&first.join("plain"), SCRIPT, 0o644);

    let path_var = search_path(&[&first, &second]);
    let resolved = resolve_in("tool", Some(path_var.as_os_str()), None).unwrap();
    assert_eq!(resolved, second.join("tool"));

    assert!(matches!(
        resolve_in("plain", Some(path_var.as_os_str()), None),
        Err(ShellError::CommandNotFound(name)) if name == "plain"
    ));
}

#[test]
fn working_directory_is_the_last_resort() {
    let root = tempfile::tempdir().unwrap();
    let bin = root.path().join("bin");
    let cwd = root.path().join("cwd");
    fs::create_dir_all(&bin).unwrap();
    fs::create_dir_all(&cwd).unwrap();
    write_script(&cwd.join("local-tool"), SCRIPT, 0o755);

    let path_var = search_path(&[&bin]);
    let resolved = resolve_in("local-tool", Some(path_var.as_os_str()), Some(cwd.as_path())).unwrap();
    assert_eq!(resolved, cwd.join("local-tool"));

    let err = resolve_in("absent-tool", Some(path_var.as_os_str()), Some(cwd.as_path())).unwrap_err();
    assert!(matches!(err, ShellError::CommandNotFound(_)));
    assert_eq!(err.status(), 127);
}

#[test]
fn resolve_reads_path_at_call_time() {
    let _guard = lock_env();
    let root = tempfile::tempdir().unwrap();
    write_script(&root.path().join("conch-probe"), SCRIPT, 0o755);
    let saved_path = env::var_os("PATH");

    unsafe {
        env::set_var("PATH", root.path());
    }
    let found = resolve("conch-probe");
    unsafe {
        env::set_var("PATH", "/nonexistent");
    }
    let missing = resolve("conch-probe");
    unsafe {
        match saved_path {
            Some(path) => env::set_var("PATH", path),
            None => env::remove_var("PATH"),
        }
    }

    assert_eq!(found.unwrap(), root.path().join("conch-probe"));
    assert!(matches!(missing, Err(ShellError::CommandNotFound(_))));
}
