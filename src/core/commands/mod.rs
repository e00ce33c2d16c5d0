use std::collections::BTreeMap;

mod cat;
mod charsets;
mod copy;
mod exit;
mod help;
mod hexdump;
mod ls;
mod mkdir;
mod symbol;
mod tree;

pub use cat::CatCommand;
pub use charsets::CharsetsCommand;
pub use copy::CopyCommand;
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use hexdump::HexdumpCommand;
pub use ls::LsCommand;
pub use mkdir::MkdirCommand;
pub use symbol::SymbolCommand;
pub use tree::TreeCommand;

use crate::input::{Console, ConsoleError};
use crate::shell::environment::Environment;
use crate::shell::ShellStatus;

#[derive(Debug)]
pub enum CommandError {
    Usage(String),
    UnknownCharset(String),
    Io(std::io::Error),
    Console(ConsoleError),
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::Io(err)
    }
}

impl From<ConsoleError> for CommandError {
    fn from(err: ConsoleError) -> Self {
        CommandError::Console(err)
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Usage(msg) => write!(f, "{}", msg),
            CommandError::UnknownCharset(name) => write!(f, "unknown charset '{}'", name),
            CommandError::Io(err) => write!(f, "input/output error: {}", err),
            CommandError::Console(err) => write!(f, "console error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

/// Everything a command body may touch: the current environment's symbols,
/// the interactive stream, and the read-only registry (for `help`).
pub struct CommandContext<'a> {
    pub env: &'a mut Environment,
    pub console: &'a mut dyn Console,
    pub registry: &'a Registry,
}

/// A named, stateless shell capability. `args` is the raw remainder of the
/// logical line after the command name: `None` when the name stood alone,
/// which commands must treat differently from an empty argument string.
pub trait ShellCommand {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static [&'static str];
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError>;
}

#[derive(Clone)]
pub enum CommandKind {
    Cat(CatCommand),
    Charsets(CharsetsCommand),
    Copy(CopyCommand),
    Exit(ExitCommand),
    Help(HelpCommand),
    Hexdump(HexdumpCommand),
    Ls(LsCommand),
    Mkdir(MkdirCommand),
    Symbol(SymbolCommand),
    Tree(TreeCommand),
}

impl ShellCommand for CommandKind {
    fn name(&self) -> &'static str {
        match self {
            CommandKind::Cat(cmd) => cmd.name(),
            CommandKind::Charsets(cmd) => cmd.name(),
            CommandKind::Copy(cmd) => cmd.name(),
            CommandKind::Exit(cmd) => cmd.name(),
            CommandKind::Help(cmd) => cmd.name(),
            CommandKind::Hexdump(cmd) => cmd.name(),
            CommandKind::Ls(cmd) => cmd.name(),
            CommandKind::Mkdir(cmd) => cmd.name(),
            CommandKind::Symbol(cmd) => cmd.name(),
            CommandKind::Tree(cmd) => cmd.name(),
        }
    }

    fn description(&self) -> &'static [&'static str] {
        match self {
            CommandKind::Cat(cmd) => cmd.description(),
            CommandKind::Charsets(cmd) => cmd.description(),
            CommandKind::Copy(cmd) => cmd.description(),
            CommandKind::Exit(cmd) => cmd.description(),
            CommandKind::Help(cmd) => cmd.description(),
            CommandKind::Hexdump(cmd) => cmd.description(),
            CommandKind::Ls(cmd) => cmd.description(),
            CommandKind::Mkdir(cmd) => cmd.description(),
            CommandKind::Symbol(cmd) => cmd.description(),
            CommandKind::Tree(cmd) => cmd.description(),
        }
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        match self {
            CommandKind::Cat(cmd) => cmd.execute(ctx, args),
            CommandKind::Charsets(cmd) => cmd.execute(ctx, args),
            CommandKind::Copy(cmd) => cmd.execute(ctx, args),
            CommandKind::Exit(cmd) => cmd.execute(ctx, args),
            CommandKind::Help(cmd) => cmd.execute(ctx, args),
            CommandKind::Hexdump(cmd) => cmd.execute(ctx, args),
            CommandKind::Ls(cmd) => cmd.execute(ctx, args),
            CommandKind::Mkdir(cmd) => cmd.execute(ctx, args),
            CommandKind::Symbol(cmd) => cmd.execute(ctx, args),
            CommandKind::Tree(cmd) => cmd.execute(ctx, args),
        }
    }
}

/// Read-only mapping from command name to command, populated once at
/// startup.
pub struct Registry {
    commands: BTreeMap<&'static str, CommandKind>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        for command in [
            CommandKind::Cat(CatCommand::new()),
            CommandKind::Charsets(CharsetsCommand::new()),
            CommandKind::Copy(CopyCommand::new()),
            CommandKind::Exit(ExitCommand::new()),
            CommandKind::Help(HelpCommand::new()),
            CommandKind::Hexdump(HexdumpCommand::new()),
            CommandKind::Ls(LsCommand::new()),
            CommandKind::Mkdir(MkdirCommand::new()),
            CommandKind::Symbol(SymbolCommand::new()),
            CommandKind::Tree(TreeCommand::new()),
        ] {
            commands.insert(command.name(), command);
        }
        Registry { commands }
    }

    pub fn get(&self, name: &str) -> Option<&CommandKind> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandKind> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Splits a raw argument string on whitespace runs and enforces the
/// command's arity before any work happens.
pub(crate) fn split_args<'a>(
    args: Option<&'a str>,
    command: &str,
    min: usize,
    max: usize,
) -> Result<Vec<&'a str>, CommandError> {
    let tokens: Vec<&str> = args
        .map(|a| a.split_whitespace().collect())
        .unwrap_or_default();

    if tokens.len() < min || tokens.len() > max {
        return Err(CommandError::Usage(format!(
            "wrong number of arguments for command '{}'",
            command
        )));
    }
    Ok(tokens)
}
