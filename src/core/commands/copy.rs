use std::fs;
use std::path::{Path, PathBuf};

use super::{split_args, CommandContext, CommandError, ShellCommand};
use crate::path::PathExpander;
use crate::shell::ShellStatus;

const DESCRIPTION: &[&str] = &[
    "'copy' copies a regular file.",
    "General syntax is:  copy SRC DEST",
    "SRC must name an existing file. If DEST names a directory the file is",
    "copied into it under its original name. If DEST already exists the",
    "user is asked before it is overwritten, and copying a file onto",
    "itself produces a ' - Copy' sibling instead of truncating the source.",
];

#[derive(Clone)]
pub struct CopyCommand {
    expander: PathExpander,
}

impl Default for CopyCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyCommand {
    pub fn new() -> Self {
        Self {
            expander: PathExpander::new(),
        }
    }
}

impl ShellCommand for CopyCommand {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn description(&self) -> &'static [&'static str] {
        DESCRIPTION
    }

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: Option<&str>,
    ) -> Result<ShellStatus, CommandError> {
        let tokens = split_args(args, "copy", 2, 2)?;

        let src = self.expander.expand(tokens[0]);
        if !src.is_file() {
            return Err(CommandError::Usage(format!(
                "source file '{}' does not exist or is not a file",
                src.display()
            )));
        }

        let dest = resolve_destination(&src, &self.expander.expand(tokens[1]));
        if dest.exists() && !confirm_overwrite(ctx, &dest)? {
            return Ok(ShellStatus::Continue);
        }

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::copy(&src, &dest)?;

        Ok(ShellStatus::Continue)
    }
}

/// A directory destination receives the file under its original name; a
/// destination resolving back to the source gets a ' - Copy' sibling name.
fn resolve_destination(src: &Path, dest: &Path) -> PathBuf {
    let mut dest = dest.to_path_buf();
    if dest.is_dir() {
        if let Some(name) = src.file_name() {
            dest.push(name);
        }
    }

    let same_file = match (fs::canonicalize(src), fs::canonicalize(&dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same_file {
        dest = copy_sibling(&dest);
    }
    dest
}

fn copy_sibling(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{} - Copy.{}", stem, ext),
        None => format!("{} - Copy", stem),
    };
    path.with_file_name(name)
}

fn confirm_overwrite(
    ctx: &mut CommandContext<'_>,
    dest: &Path,
) -> Result<bool, CommandError> {
    loop {
        ctx.console.writeln(&format!(
            "File '{}' already exists. Would you like to overwrite it? (Y/N)",
            dest.display()
        ))?;
        let answer = ctx.console.read_line("> ")?;
        match answer.trim() {
            "Y" | "y" => return Ok(true),
            "N" | "n" => return Ok(false),
            _ => ctx.console.writeln("Invalid answer!")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::Registry;
    use crate::input::ScriptedConsole;
    use crate::shell::environment::Environment;
    use std::env;

    fn scratch(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("atrium-copy-{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_copy_to_a_new_file() {
        let dir = scratch("new");
        let src = dir.join("a.txt");
        fs::write(&src, "payload").unwrap();
        let dest = dir.join("b.txt");

        let registry = Registry::new();
        let mut env = Environment::default();
        let mut console = ScriptedConsole::new(&[]);
        let mut ctx = CommandContext {
            env: &mut env,
            console: &mut console,
            registry: &registry,
        };

        let args = format!("{} {}", src.display(), dest.display());
        CopyCommand::new().execute(&mut ctx, Some(&args)).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "payload");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_copy_into_a_directory_keeps_the_name() {
        let dir = scratch("into-dir");
        let src = dir.join("a.txt");
        fs::write(&src, "payload").unwrap();
        let sub = dir.join("sub");
        fs::create_dir(&sub).unwrap();

        let registry = Registry::new();
        let mut env = Environment::default();
        let mut console = ScriptedConsole::new(&[]);
        let mut ctx = CommandContext {
            env: &mut env,
            console: &mut console,
            registry: &registry,
        };

        let args = format!("{} {}", src.display(), sub.display());
        CopyCommand::new().execute(&mut ctx, Some(&args)).unwrap();
        assert_eq!(fs::read_to_string(sub.join("a.txt")).unwrap(), "payload");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_declined_overwrite_leaves_the_destination_alone() {
        let dir = scratch("decline");
        let src = dir.join("a.txt");
        fs::write(&src, "new").unwrap();
        let dest = dir.join("b.txt");
        fs::write(&dest, "old").unwrap();

        let registry = Registry::new();
        let mut env = Environment::default();
        let mut console = ScriptedConsole::new(&["N"]);
        let mut ctx = CommandContext {
            env: &mut env,
            console: &mut console,
            registry: &registry,
        };

        let args = format!("{} {}", src.display(), dest.display());
        let status = CopyCommand::new().execute(&mut ctx, Some(&args)).unwrap();
        assert_eq!(status, ShellStatus::Continue);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_confirmed_overwrite_replaces_the_destination() {
        let dir = scratch("confirm");
        let src = dir.join("a.txt");
        fs::write(&src, "new").unwrap();
        let dest = dir.join("b.txt");
        fs::write(&dest, "old").unwrap();

        let registry = Registry::new();
        let mut env = Environment::default();
        // An invalid answer first, then yes.
        let mut console = ScriptedConsole::new(&["what", "Y"]);
        let mut ctx = CommandContext {
            env: &mut env,
            console: &mut console,
            registry: &registry,
        };

        let args = format!("{} {}", src.display(), dest.display());
        CopyCommand::new().execute(&mut ctx, Some(&args)).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
        assert!(console.output.contains("Invalid answer!"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_copy_onto_itself_makes_a_sibling() {
        let dir = scratch("self");
        let src = dir.join("a.txt");
        fs::write(&src, "payload").unwrap();

        let registry = Registry::new();
        let mut env = Environment::default();
        let mut console = ScriptedConsole::new(&[]);
        let mut ctx = CommandContext {
            env: &mut env,
            console: &mut console,
            registry: &registry,
        };

        let args = format!("{} {}", src.display(), src.display());
        CopyCommand::new().execute(&mut ctx, Some(&args)).unwrap();
        assert_eq!(
            fs::read_to_string(dir.join("a - Copy.txt")).unwrap(),
            "payload"
        );
        assert_eq!(fs::read_to_string(&src).unwrap(), "payload");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_copy_sibling_names() {
        assert_eq!(
            copy_sibling(Path::new("/tmp/a.txt")),
            PathBuf::from("/tmp/a - Copy.txt")
        );
        assert_eq!(
            copy_sibling(Path::new("/tmp/noext")),
            PathBuf::from("/tmp/noext - Copy")
        );
    }

    #[test]
    fn test_missing_source_is_a_usage_error() {
        let registry = Registry::new();
        let mut env = Environment::default();
        let mut console = ScriptedConsole::new(&[]);
        let mut ctx = CommandContext {
            env: &mut env,
            console: &mut console,
            registry: &registry,
        };

        let result = CopyCommand::new().execute(&mut ctx, Some("/no/such/file /tmp/out"));
        assert!(matches!(result, Err(CommandError::Usage(_))));
    }
}
