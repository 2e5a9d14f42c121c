use super::support::{CwdGuard, Harness, canonical_path, lock_env};
use conch::ShellError;
use std::env;
use std::io::{self, Write};
use std::path::Path;

#[test]
fn help_lists_every_builtin_in_registration_order() {
    let mut shell = Harness::new();
    assert_eq!(shell.run(&["help"]).unwrap(), 0);

    let output = shell.output();
    let names: Vec<&str> = output
        .lines()
        .map(|line| line.split(" - ").next().unwrap())
        .collect();
    assert_eq!(names, vec!["help", "exit", "pwd", "cd", "wait", "fg", "bg", "jobs"]);
    assert!(output.contains("cd - change the working directory"));
}

struct ClosedOutput;

impl Write for ClosedOutput {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn help_succeeds_when_output_is_closed() {
    let mut shell = Harness::new();
    shell.state.capture_output(ClosedOutput);
    assert_eq!(shell.run(&["help"]).unwrap(), 0);
}

#[test]
fn pwd_prints_the_working_directory() {
    let _guard = lock_env();
    let _cwd = CwdGuard::new();
    let temp_dir = tempfile::tempdir().unwrap();
    env::set_current_dir(temp_dir.path()).unwrap();

    let mut shell = Harness::new();
    assert_eq!(shell.run(&["pwd"]).unwrap(), 0);

    let output = shell.output();
    assert_eq!(
        canonical_path(Path::new(output.trim_end())),
        canonical_path(temp_dir.path())
    );
}

#[test]
fn exit_records_the_requested_status() {
    let mut shell = Harness::new();
    assert_eq!(shell.state.exit_request(), None);

    assert_eq!(shell.run(&["exit", "3"]).unwrap(), 3);
    assert_eq!(shell.state.exit_request(), Some(3));

    let mut shell = Harness::new();
    assert_eq!(shell.run(&["exit"]).unwrap(), 0);
    assert_eq!(shell.state.exit_request(), Some(0));
}

#[test]
fn exit_rejects_non_numeric_status() {
    let mut shell = Harness::new();
    assert!(matches!(shell.run(&["exit", "soon"]), Err(ShellError::Syntax(_))));
    assert_eq!(shell.state.exit_request(), None);
}

#[test]
fn empty_token_sequence_is_a_no_op() {
    let mut shell = Harness::new();
    assert_eq!(shell.run(&[]).unwrap(), 0);
    assert!(shell.output().is_empty());
    assert!(shell.state.jobs().is_empty());
}

#[test]
fn registry_lookup_distinguishes_builtins() {
    let shell = Harness::new();
    assert!(shell.builtins.contains("fg"));
    assert!(shell.builtins.lookup("ls").is_none());
}
