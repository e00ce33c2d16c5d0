use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::path::PathExpander;
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'ls' lists the files and directories under a directory path.",
    "General syntax is:  ls [DIRECTORY]",
    "When DIRECTORY is omitted the current directory is listed. Every",
    "entry is printed as:  flags size yyyy-mm-dd hh:mm:ss name",
    "where flags marks directory (d), readable (r), writable (w) and",
    "executable (x), with '-' for anything that does not apply.",
];

#[derive(Clone)]
pub struct LsCommand {
    expander: PathExpander,
}

impl Default for LsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl LsCommand {
    pub fn new() -> Self {
        Self {
            expander: PathExpander::new(),
        }
    }
}

impl ShellCommand for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        let tokens = split_args(args, "ls", 0, 1)?;

        let dir = self.expander.expand(tokens.first().copied().unwrap_or("."));
        if !dir.is_dir() {
            return Err(CommandError::Usage(format!(
                "'{}' is not a directory",
                dir.display()
            )));
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .collect();
        entries.sort();

        for path in entries {
            ctx.console.writeln(&format_entry(&path)?)?;
        }

        Ok(ShellStatus::Continue)
    }
}

fn format_entry(path: &Path) -> Result<String, CommandError> {
    let metadata = fs::symlink_metadata(path)?;
    let size = if metadata.is_dir() {
        dir_size(path)
    } else {
        metadata.len()
    };
    let modified: DateTime<Local> = metadata.modified()?.into();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(format!(
        "{} {:>10} {} {}",
        flags(&metadata),
        size,
        modified.format("%Y-%m-%d %H:%M:%S"),
        name
    ))
}

fn flags(metadata: &fs::Metadata) -> String {
    let mut flags = String::with_capacity(4);
    flags.push(if metadata.is_dir() { 'd' } else { '-' });
    flags.push(if readable(metadata) { 'r' } else { '-' });
    flags.push(if !metadata.permissions().readonly() { 'w' } else { '-' });
    flags.push(if executable(metadata) { 'x' } else { '-' });
    flags
}

#[cfg(unix)]
fn readable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o400 != 0
}

#[cfg(not(unix))]
fn readable(_metadata: &fs::Metadata) -> bool {
    true
}

#[cfg(unix)]
fn executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn executable(_metadata: &fs::Metadata) -> bool {
    false
}

/// Directories are reported with the recursive size of their contents.
/// Entries that cannot be read count as zero rather than failing the
/// listing.
fn dir_size(dir: &Path) -> u64 {
    let mut size = 0;
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.filter_map(Result::ok) {
            match entry.metadata() {
                Ok(metadata) if metadata.is_dir() => size += dir_size(&entry.path()),
                Ok(metadata) => size += metadata.len(),
                Err(_) => {}
            }
        }
    }
    size
}
