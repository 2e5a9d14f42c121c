use crate::conf::ConfigurationModel;
use crate::control_state::{ControlFlow, ControlState};
use crate::state::ShellState;
use crate::terminal::Terminal;
use rustyline::error::ReadlineError;
use rustyline::{self, DefaultEditor};
use std::error::Error;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Source of input lines for the control loop.
pub trait LineEditor {
    fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError>;
    fn add_history_entry(&mut self, entry: &str) -> rustyline::Result<bool>;
}

impl LineEditor for DefaultEditor {
    fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        DefaultEditor::readline(self, prompt)
    }

    fn add_history_entry(&mut self, entry: &str) -> rustyline::Result<bool> {
        DefaultEditor::add_history_entry(self, entry)
    }
}

/// Set up the terminal and run the shell until `exit` or end of input.
///
/// Returns the status the process should exit with. The shell state, and with
/// it the saved terminal modes, is restored before this returns.
pub fn control_loop(config: &ConfigurationModel) -> Result<i32, Box<dyn Error>> {
    let terminal = Terminal::init()?;
    let mut control_state = ControlState::from_config(ShellState::new(terminal), config);
    let mut editor = DefaultEditor::new()?;
    let mut stderr = io::stderr();

    run_loop_with_editor(&mut control_state, &mut editor, &mut stderr)?;

    let code = control_state.exit_code().unwrap_or(control_state.status());
    debug!(code, "control loop finished");
    Ok(code)
}

/// Main command control loop for processing commands.
pub fn run_loop_with_editor<E, W>(
    control_state: &mut ControlState,
    editor: &mut E,
    sink: &mut W,
) -> io::Result<()>
where
    E: LineEditor + ?Sized,
    W: Write + ?Sized,
{
    loop {
        let prompt = control_state.prompt();

        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = editor.add_history_entry(&line) {
                        warn!("unable to record history entry: {err}");
                    }
                }

                if control_state.handle_line(&line, sink)? == ControlFlow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                writeln!(sink, "conch: {err}")?;
                break;
            }
        }
    }

    Ok(())
}
