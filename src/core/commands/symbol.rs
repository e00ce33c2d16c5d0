use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'symbol' shows or changes the current environment's control symbols.",
    "General syntax is:  symbol MORELINES|MULTILINE [CHARACTER]",
    "MORELINES is the trailing character that asks for another input line;",
    "MULTILINE is the character shown in front of continuation lines.",
    "Without CHARACTER the current symbol is printed. The prompt symbol is",
    "managed separately through 'symbol PROMPT'.",
];

#[derive(Clone)]
pub struct SymbolCommand;

impl Default for SymbolCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolCommand {
    pub fn new() -> Self {
        Self
    }
}

impl ShellCommand for SymbolCommand {
    fn name(&self) -> &'static str {
        "symbol"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        let tokens = split_args(args, "symbol", 1, 2)?;

        let keyword = tokens[0];
        let current = match keyword {
            "MORELINES" => ctx.env.continuation(),
            "MULTILINE" => ctx.env.prefix(),
            _ => {
                return Err(CommandError::Usage(
                    "invalid arguments for the command 'symbol'".to_string(),
                ))
            }
        };

        match tokens.get(1) {
            None => {
                ctx.console
                    .writeln(&format!("Symbol for {} is '{}'", keyword, current))?;
            }
            Some(raw) => {
                let symbol = single_character(raw)?;
                ctx.console.writeln(&format!(
                    "Symbol for {} changed from '{}' to '{}'",
                    keyword, current, symbol
                ))?;
                match keyword {
                    "MORELINES" => ctx.env.set_continuation(symbol),
                    _ => ctx.env.set_prefix(symbol),
                }
            }
        }

        Ok(ShellStatus::Continue)
    }
}

fn single_character(token: &str) -> Result<char, CommandError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(CommandError::Usage(
            "the symbol must be a single character".to_string(),
        )),
    }
}
