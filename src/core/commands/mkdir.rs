use std::fs;

use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::path::PathExpander;
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'mkdir' makes a new directory, creating missing parents on the way.",
    "General syntax is:  mkdir DIRECTORY",
];

#[derive(Clone)]
pub struct MkdirCommand {
    expander: PathExpander,
}

impl Default for MkdirCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl MkdirCommand {
    pub fn new() -> Self {
        Self {
            expander: PathExpander::new(),
        }
    }
}

impl ShellCommand for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        let tokens = split_args(args, "mkdir", 1, 1)?;

        let path = self.expander.expand(tokens[0]);
        if path.exists() && !path.is_dir() {
            return Err(CommandError::Usage(format!(
                "'{}' exists and is not a directory",
                path.display()
            )));
        }
        fs::create_dir_all(&path)?;

        Ok(ShellStatus::Continue)
    }
}
