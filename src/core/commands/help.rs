use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'help' prints the list of commands, or the description of one command.",
    "General syntax is:  help [CMD]",
];

#[derive(Clone)]
pub struct HelpCommand;

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl ShellCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        let tokens = split_args(args, "help", 0, 1)?;

        match tokens.first() {
            None => {
                for name in ctx.registry.names() {
                    ctx.console.writeln(name)?;
                }
            }
            Some(name) => match ctx.registry.get(name) {
                Some(command) => {
                    ctx.console.writeln(command.name())?;
                    for line in command.description() {
                        ctx.console.writeln(line)?;
                    }
                }
                None => {
                    ctx.console.writeln(&format!(
                        "Error: '{}' is not recognized as a command!",
                        name
                    ))?;
                }
            },
        }

        Ok(ShellStatus::Continue)
    }
}
