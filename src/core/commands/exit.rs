use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'exit' leaves the shell.",
    "General syntax is:  exit",
];

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl ShellCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        split_args(args, "exit", 0, 0)?;
        Ok(ShellStatus::Terminate)
    }
}
