//! Process-wide shell state shared by builtins and the launcher.

use crate::jobs::JobTable;
use crate::terminal::Terminal;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Where builtins write their regular output.
enum OutputSink {
    Stdout,
    Buffer(Rc<RefCell<Vec<u8>>>),
    Writer(Box<dyn Write>),
}

pub struct ShellState {
    terminal: Terminal,
    jobs: JobTable,
    output: OutputSink,
    notify_background: bool,
    exit_request: Option<i32>,
}

impl ShellState {
    pub fn new(terminal: Terminal) -> Self {
        ShellState {
            terminal,
            jobs: JobTable::new(),
            output: OutputSink::Stdout,
            notify_background: true,
            exit_request: None,
        }
    }

    /// State backed by a non-interactive terminal.
    pub fn headless() -> Self {
        Self::new(Terminal::non_interactive())
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal {
        &mut self.terminal
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub fn jobs_mut(&mut self) -> &mut JobTable {
        &mut self.jobs
    }

    pub fn set_notify_background(&mut self, notify: bool) {
        self.notify_background = notify;
    }

    pub fn notify_background(&self) -> bool {
        self.notify_background
    }

    /// Send builtin output into `buffer` instead of standard output.
    pub fn capture_output_buffer(&mut self, buffer: Rc<RefCell<Vec<u8>>>) {
        self.output = OutputSink::Buffer(buffer);
    }

    /// Send builtin output to an arbitrary writer.
    pub fn capture_output<W: Write + 'static>(&mut self, writer: W) {
        self.output = OutputSink::Writer(Box::new(writer));
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        match &mut self.output {
            OutputSink::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{line}")?;
                stdout.flush()
            }
            OutputSink::Buffer(buffer) => writeln!(buffer.borrow_mut(), "{line}"),
            OutputSink::Writer(writer) => {
                writeln!(writer, "{line}")?;
                writer.flush()
            }
        }
    }

    pub fn request_exit(&mut self, code: i32) {
        self.exit_request = Some(code);
    }

    pub fn exit_request(&self) -> Option<i32> {
        self.exit_request
    }
}
