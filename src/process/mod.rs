//! Shell builtin implementations and process execution helpers.

pub mod bg;
pub mod builtin;
pub mod cd;
pub mod exit;
pub mod fg;
pub mod help;
pub mod jobs;
pub mod launch;
pub mod pwd;
pub mod redirect;
pub mod resolve;
pub mod wait;

use crate::error::ShellResult;
use crate::state::ShellState;
use builtin::Invocation;
use builtin::map::BuiltinMap;

/// Run one command line, dispatching to a builtin or launching a program.
///
/// Builtins receive the full token sequence. Anything else goes through
/// [`launch::build_argv`] and [`launch::launch`]. An empty line is a no-op.
pub fn dispatch(builtins: &BuiltinMap, state: &mut ShellState, tokens: &[String]) -> ShellResult<i32> {
    let Some(name) = tokens.first() else {
        return Ok(0);
    };

    // Determine if command is builtin, and call function
    if let Some(handler) = builtins.lookup(name) {
        let mut invocation = Invocation {
            state,
            registry: builtins,
        };
        return handler.call(&mut invocation, tokens);
    }

    let command = launch::build_argv(tokens)?;
    launch::launch(state, &command)
}
