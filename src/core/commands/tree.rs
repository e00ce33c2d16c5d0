use std::fs;
use std::path::{Path, PathBuf};

use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::path::PathExpander;
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'tree' prints a depth-indented listing of files.",
    "General syntax is:  tree [DIRECTORY]",
    "When DIRECTORY is omitted the current directory is walked. The root",
    "is printed as an absolute path and every level below it shifts the",
    "output two characters to the right.",
];

#[derive(Clone)]
pub struct TreeCommand {
    expander: PathExpander,
}

impl Default for TreeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeCommand {
    pub fn new() -> Self {
        Self {
            expander: PathExpander::new(),
        }
    }
}

impl ShellCommand for TreeCommand {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        let tokens = split_args(args, "tree", 0, 1)?;

        let root = self.expander.expand(tokens.first().copied().unwrap_or("."));
        if !root.is_dir() {
            return Err(CommandError::Usage(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        let absolute = fs::canonicalize(&root)?;
        ctx.console.writeln(&absolute.display().to_string())?;
        walk(ctx, &root, 1)?;

        Ok(ShellStatus::Continue)
    }
}

fn walk(
    ctx: &mut CommandContext<'_>,
    dir: &Path,
    level: usize,
) -> Result<(), CommandError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for path in entries {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ctx.console
            .writeln(&format!("{:indent$}{}", "", name, indent = 2 * level))?;
        if path.is_dir() {
            walk(ctx, &path, level + 1)?;
        }
    }

    Ok(())
}
