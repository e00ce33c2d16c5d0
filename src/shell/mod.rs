mod dispatch;
pub mod environment;

use log::debug;

use crate::{
    core::{commands::Registry, config::Config},
    error::ShellError,
    flags::Flags,
    highlight::MessageStyler,
    input::{assemble_line, Console, ConsoleError, TerminalConsole},
};

pub use dispatch::dispatch;
use environment::EnvironmentDirectory;

/// Whether the loop keeps accepting input. Every command execution and the
/// top-level line handler produce one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStatus {
    Continue,
    Terminate,
}

pub struct Shell {
    registry: Registry,
    directory: EnvironmentDirectory,
    console: Box<dyn Console>,
    styler: MessageStyler,
    flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let config = Config::load(flags.get_value("config").map(String::as_str))?;
        let directory = EnvironmentDirectory::new(config.initial_environment());
        let console = TerminalConsole::new()?;

        // Ctrl-C outside of a read (e.g. while a command runs) should not
        // kill the process; rustyline reports it during reads.
        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to exit the shell");
        })?;

        Ok(Shell {
            registry: Registry::new(),
            directory,
            console: Box::new(console),
            styler: MessageStyler::new(),
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            let banner = format!("Welcome to Atrium v{}", env!("CARGO_PKG_VERSION"));
            let banner = self.styler.success(&banner);
            self.console.writeln(&banner)?;
        }

        // A single read failure aborts only the current line; a second one
        // in a row means the stream is unusable.
        let mut read_failed = false;

        loop {
            let line = match assemble_line(self.directory.current(), self.console.as_mut()) {
                Ok(line) => {
                    read_failed = false;
                    line
                }
                Err(ConsoleError::Interrupted) => {
                    if !self.flags.is_set("quiet") {
                        let hint = self.styler.hint("Use 'exit' to exit the shell");
                        self.console.writeln(&hint)?;
                    }
                    continue;
                }
                Err(ConsoleError::Eof) => break,
                Err(ConsoleError::Io(e)) => {
                    eprintln!(
                        "{}",
                        self.styler
                            .error(&format!("Error: input/output exception occurred: {}", e))
                    );
                    if read_failed {
                        break;
                    }
                    read_failed = true;
                    continue;
                }
            };

            match dispatch(
                &line,
                &self.registry,
                &mut self.directory,
                self.console.as_mut(),
            ) {
                Ok(ShellStatus::Continue) => {}
                Ok(ShellStatus::Terminate) => break,
                Err(e) => {
                    eprintln!("{}", self.styler.error(&format!("Error: {}", e)));
                }
            }
        }

        debug!("shell terminated");
        Ok(())
    }
}
