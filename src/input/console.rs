use std::path::PathBuf;

use log::warn;
use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

use super::completer::ShellCompleter;

#[derive(Debug)]
pub enum ConsoleError {
    Interrupted,
    Eof,
    Io(std::io::Error),
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::Io(err)
    }
}

impl From<ReadlineError> for ConsoleError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Interrupted => ConsoleError::Interrupted,
            ReadlineError::Eof => ConsoleError::Eof,
            ReadlineError::Io(e) => ConsoleError::Io(e),
            other => ConsoleError::Io(std::io::Error::other(other.to_string())),
        }
    }
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleError::Interrupted => write!(f, "interrupted"),
            ConsoleError::Eof => write!(f, "end of input"),
            ConsoleError::Io(e) => write!(f, "input/output error: {}", e),
        }
    }
}

impl std::error::Error for ConsoleError {}

/// Line-oriented access to the interactive stream. The shell loop, the line
/// assembler and every command talk to the user through this seam, which is
/// what lets the tests drive them with scripted input.
pub trait Console {
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError>;
    fn write(&mut self, text: &str) -> Result<(), ConsoleError>;
    fn writeln(&mut self, text: &str) -> Result<(), ConsoleError>;
}

pub struct TerminalConsole {
    editor: Editor<ShellCompleter, FileHistory>,
    history_path: Option<PathBuf>,
}

impl TerminalConsole {
    pub fn new() -> Result<Self, ConsoleError> {
        let mut editor = Editor::<ShellCompleter, FileHistory>::new().map_err(ConsoleError::from)?;
        editor.set_helper(Some(ShellCompleter::new()));
        editor.set_auto_add_history(true);

        let history_path = dirs::home_dir().map(|home| home.join(".atrium_history"));
        if let Some(path) = &history_path {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    warn!("could not load history from {}: {}", path.display(), e);
                }
            }
        }

        Ok(TerminalConsole {
            editor,
            history_path,
        })
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.editor.readline(prompt).map_err(ConsoleError::from)
    }

    fn write(&mut self, text: &str) -> Result<(), ConsoleError> {
        use std::io::Write;
        let mut out = std::io::stdout();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn writeln(&mut self, text: &str) -> Result<(), ConsoleError> {
        use std::io::Write;
        let mut out = std::io::stdout();
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        if let Some(path) = &self.history_path {
            if let Err(e) = self.editor.save_history(path) {
                warn!("could not save history to {}: {}", path.display(), e);
            }
        }
    }
}

/// Test double: serves scripted input lines and records every prompt and
/// everything written.
#[cfg(test)]
pub struct ScriptedConsole {
    input: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: String,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        ScriptedConsole {
            input: lines.iter().map(|l| l.to_string()).collect(),
            prompts: Vec::new(),
            output: String::new(),
        }
    }

    pub fn reads(&self) -> usize {
        self.prompts.len()
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.prompts.push(prompt.to_string());
        self.input.pop_front().ok_or(ConsoleError::Eof)
    }

    fn write(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.output.push_str(text);
        Ok(())
    }

    fn writeln(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.output.push_str(text);
        self.output.push('\n');
        Ok(())
    }
}
