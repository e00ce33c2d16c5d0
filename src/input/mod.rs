mod assembler;
mod completer;
mod console;

pub use assembler::assemble_line;
pub use completer::ShellCompleter;
pub use console::{Console, ConsoleError, TerminalConsole};

#[cfg(test)]
pub use console::ScriptedConsole;
