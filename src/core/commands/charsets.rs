use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'charsets' displays the charset labels the 'cat' command accepts.",
    "General syntax is:  charsets",
];

// Labels resolved through encoding_rs; a subset of the WHATWG registry that
// covers the encodings files around here actually come in.
const SUPPORTED: &[&str] = &[
    "UTF-8",
    "UTF-16LE",
    "UTF-16BE",
    "ISO-8859-1",
    "ISO-8859-2",
    "ISO-8859-15",
    "windows-1250",
    "windows-1251",
    "windows-1252",
    "KOI8-R",
    "EUC-JP",
    "Shift_JIS",
    "GBK",
    "Big5",
];

#[derive(Clone)]
pub struct CharsetsCommand;

impl Default for CharsetsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CharsetsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl ShellCommand for CharsetsCommand {
    fn name(&self) -> &'static str {
        "charsets"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        split_args(args, "charsets", 0, 0)?;

        for label in SUPPORTED {
            ctx.console.writeln(label)?;
        }

        Ok(ShellStatus::Continue)
    }
}
