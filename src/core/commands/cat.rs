use std::fs;

use encoding_rs::Encoding;

use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::path::PathExpander;
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'cat' reads the contents of a file and writes it to the console.",
    "General syntax is:  cat FILE [CHARSET]",
    "FILE is the path of the file to read and is mandatory. CHARSET names",
    "the encoding used to decode the bytes; when omitted, UTF-8 is used.",
    "The accepted labels are listed by the 'charsets' command.",
];

#[derive(Clone)]
pub struct CatCommand {
    expander: PathExpander,
}

impl Default for CatCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CatCommand {
    pub fn new() -> Self {
        Self {
            expander: PathExpander::new(),
        }
    }
}

impl ShellCommand for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        let tokens = split_args(args, "cat", 1, 2)?;

        let encoding = match tokens.get(1) {
            Some(label) => Encoding::for_label(label.as_bytes())
                .ok_or_else(|| CommandError::UnknownCharset((*label).to_string()))?,
            None => encoding_rs::UTF_8,
        };

        let bytes = fs::read(self.expander.expand(tokens[0]))?;
        let (text, _, _) = encoding.decode(&bytes);
        ctx.console.write(&text)?;

        Ok(ShellStatus::Continue)
    }
}
