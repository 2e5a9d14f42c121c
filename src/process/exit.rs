use crate::error::{ShellError, ShellResult};
use crate::process::builtin::{Builtin, Invocation, operands};

/// Implements the `exit [status]` builtin.
///
/// The builtin only records the request; the control loop stops reading,
/// drops the shell state (restoring the terminal) and then exits the process.
pub struct Exit;

impl Builtin for Exit {
    fn call(&self, invocation: &mut Invocation<'_>, args: &[String]) -> ShellResult<i32> {
        let code = match operands(args) {
            [] => 0,
            [code] => code
                .parse::<i32>()
                .map_err(|_| ShellError::Syntax(format!("exit: numeric argument required: {code}")))?,
            _ => return Err(ShellError::Syntax("exit: too many arguments".into())),
        };

        invocation.state.request_exit(code);
        Ok(code)
    }
}
