//! Execution core of an interactive job-control shell.
//!
//! A command line arrives as a token sequence. [`process::dispatch`] runs it
//! either as a builtin or as an external program launched in its own process
//! group, with [`terminal::Terminal`] handing the controlling terminal back and
//! forth and [`jobs::JobTable`] tracking background and stopped jobs.

pub mod conf;
pub mod control;
pub mod control_state;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod process;
pub mod state;
pub mod terminal;

pub use error::{ShellError, ShellResult};
