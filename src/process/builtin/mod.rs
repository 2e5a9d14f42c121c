pub mod map;

use super::launch::BACKGROUND_MARKER;
use crate::error::ShellResult;
use crate::state::ShellState;
use map::BuiltinMap;

/// Everything a builtin may touch while it runs.
pub struct Invocation<'a> {
    pub state: &'a mut ShellState,
    pub registry: &'a BuiltinMap,
}

pub trait Builtin {
    /// Run the builtin with the full token sequence, command name included.
    fn call(&self, invocation: &mut Invocation<'_>, args: &[String]) -> ShellResult<i32>;
}

/// Operands of a builtin invocation: everything after the name, minus a
/// trailing background marker which builtins do not honour.
pub(crate) fn operands(args: &[String]) -> &[String] {
    let rest = args.get(1..).unwrap_or(&[]);
    match rest.split_last() {
        Some((last, init)) if last == BACKGROUND_MARKER => init,
        _ => rest,
    }
}
