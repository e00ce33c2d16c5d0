use std::fs;

use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::path::PathExpander;
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'hexdump' reads a file and displays its contents as hex.",
    "General syntax is:  hexdump FILE",
    "Each line shows the offset of its first byte, sixteen bytes in two",
    "groups of eight, and the printable-ASCII rendering of those bytes",
    "('.' stands in for anything outside 32-126).",
];

const BYTES_PER_LINE: usize = 16;

#[derive(Clone)]
pub struct HexdumpCommand {
    expander: PathExpander,
}

impl Default for HexdumpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl HexdumpCommand {
    pub fn new() -> Self {
        Self {
            expander: PathExpander::new(),
        }
    }
}

impl ShellCommand for HexdumpCommand {
    fn name(&self) -> &'static str {
        "hexdump"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        let tokens = split_args(args, "hexdump", 1, 1)?;

        let bytes = fs::read(self.expander.expand(tokens[0]))?;
        for (index, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
            ctx.console
                .writeln(&format_line(index * BYTES_PER_LINE, chunk))?;
        }

        Ok(ShellStatus::Continue)
    }
}

fn format_line(offset: usize, chunk: &[u8]) -> String {
    let mut line = format!("{:08x}: ", offset);

    for i in 0..BYTES_PER_LINE {
        match chunk.get(i) {
            Some(byte) => line.push_str(&format!("{:02x}", byte)),
            None => line.push_str("  "),
        }
        line.push(match i {
            7 | 15 => '|',
            _ => ' ',
        });
    }

    for &byte in chunk {
        line.push(if (32..=126).contains(&byte) {
            byte as char
        } else {
            '.'
        });
    }

    line
}
