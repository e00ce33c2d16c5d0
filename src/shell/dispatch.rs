use log::debug;

use super::environment::EnvironmentDirectory;
use super::ShellStatus;
use crate::core::commands::{CommandContext, CommandError, Registry, ShellCommand};
use crate::error::ShellError;
use crate::input::Console;

/// Executes one trimmed logical line against the current environment.
/// Command failures are reported here and never propagate; only an explicit
/// `Terminate` status (or a dead console) ends the loop.
pub fn dispatch(
    line: &str,
    registry: &Registry,
    directory: &mut EnvironmentDirectory,
    console: &mut dyn Console,
) -> Result<ShellStatus, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellStatus::Continue);
    }

    // 'symbol PROMPT' is the environment-switch operation, not a registry
    // entry, and is claimed before lookup.
    if let Some(rest) = prompt_switch_args(line) {
        return switch_prompt(&rest, directory, console);
    }

    let (name, args) = split_line(line);
    let Some(command) = registry.get(name) else {
        console.writeln(&format!(
            "Error: '{}' is not recognized as a command!",
            name
        ))?;
        return Ok(ShellStatus::Continue);
    };

    debug!("dispatching '{}' (args: {:?})", name, args);
    let result = {
        let mut ctx = CommandContext {
            env: directory.current_mut(),
            console: &mut *console,
            registry,
        };
        command.execute(&mut ctx, args)
    };

    match result {
        Ok(status) => Ok(status),
        Err(CommandError::Console(e)) => Err(e.into()),
        Err(e) => {
            console.writeln(&format!("Error: {}!", e))?;
            Ok(ShellStatus::Continue)
        }
    }
}

/// Splits on the first whitespace run. A name standing alone yields `None`
/// for the remainder, which commands must distinguish from an empty string.
fn split_line(line: &str) -> (&str, Option<&str>) {
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim_start())),
        None => (line, None),
    }
}

fn prompt_switch_args(line: &str) -> Option<Vec<&str>> {
    let mut tokens = line.split_whitespace();
    if tokens.next() == Some("symbol") && tokens.next() == Some("PROMPT") {
        Some(tokens.collect())
    } else {
        None
    }
}

fn switch_prompt(
    args: &[&str],
    directory: &mut EnvironmentDirectory,
    console: &mut dyn Console,
) -> Result<ShellStatus, ShellError> {
    let mut tail = args.iter();
    match (tail.next(), tail.next()) {
        (None, _) => {
            console.writeln(&format!(
                "Symbol for PROMPT is '{}'",
                directory.current().prompt()
            ))?;
        }
        (Some(token), None) => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(target), None) => {
                    let switch = directory.switch_to(target);
                    debug!(
                        "{} environment '{}'",
                        if switch.created { "created" } else { "resumed" },
                        switch.to
                    );
                    console.writeln(&format!(
                        "Symbol for PROMPT changed from '{}' to '{}'",
                        switch.from, switch.to
                    ))?;
                }
                _ => {
                    console.writeln("Error: invalid arguments for the command 'symbol'!")?;
                }
            }
        }
        (Some(_), Some(_)) => {
            console.writeln("Error: invalid arguments for the command 'symbol'!")?;
        }
    }

    Ok(ShellStatus::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedConsole;
    use crate::shell::environment::Environment;
    use std::env;
    use std::fs;

    fn run(lines: &[&str]) -> (EnvironmentDirectory, ScriptedConsole, Vec<ShellStatus>) {
        let registry = Registry::new();
        let mut directory = EnvironmentDirectory::new(Environment::default());
        let mut console = ScriptedConsole::new(&[]);
        let mut statuses = Vec::new();
        for line in lines {
            statuses.push(dispatch(line, &registry, &mut directory, &mut console).unwrap());
        }
        (directory, console, statuses)
    }

    #[test]
    fn test_empty_line_is_a_silent_continue() {
        let (_, console, statuses) = run(&["", "   "]);
        assert_eq!(statuses, vec![ShellStatus::Continue, ShellStatus::Continue]);
        assert!(console.output.is_empty());
    }

    #[test]
    fn test_unknown_command_reports_once_and_continues() {
        let (_, console, statuses) = run(&["launch missiles"]);
        assert_eq!(statuses, vec![ShellStatus::Continue]);
        assert_eq!(
            console.output,
            "Error: 'launch' is not recognized as a command!\n"
        );
    }

    #[test]
    fn test_exit_terminates() {
        let (_, _, statuses) = run(&["exit"]);
        assert_eq!(statuses, vec![ShellStatus::Terminate]);
    }

    #[test]
    fn test_exit_with_arguments_continues() {
        let (_, console, statuses) = run(&["exit now"]);
        assert_eq!(statuses, vec![ShellStatus::Continue]);
        assert!(console.output.contains("wrong number of arguments"));
    }

    #[test]
    fn test_prompt_query_reports_current_symbol() {
        let (_, console, _) = run(&["symbol PROMPT"]);
        assert_eq!(console.output, "Symbol for PROMPT is '>'\n");
    }

    #[test]
    fn test_prompt_switch_creates_and_reports() {
        let (directory, console, _) = run(&["symbol PROMPT $"]);
        assert_eq!(directory.current().prompt(), '$');
        assert_eq!(
            console.output,
            "Symbol for PROMPT changed from '>' to '$'\n"
        );
    }

    #[test]
    fn test_prompt_switch_format_errors_leave_state_alone() {
        let (directory, console, _) = run(&["symbol PROMPT a b", "symbol  PROMPT  ab"]);
        assert_eq!(directory.current().prompt(), '>');
        assert_eq!(directory.len(), 1);
        assert_eq!(
            console.output.lines().count(),
            2,
            "both malformed lines must be reported"
        );
        assert!(console
            .output
            .lines()
            .all(|l| l == "Error: invalid arguments for the command 'symbol'!"));
    }

    #[test]
    fn test_revisiting_a_prompt_restores_its_symbols() {
        let (directory, console, _) = run(&[
            "symbol PROMPT $",
            "symbol MORELINES +",
            "symbol MULTILINE .",
            "symbol PROMPT >",
            "symbol PROMPT $",
        ]);

        assert_eq!(directory.current().prompt(), '$');
        assert_eq!(directory.current().continuation(), '+');
        assert_eq!(directory.current().prefix(), '.');
        assert!(console
            .output
            .contains("Symbol for PROMPT changed from '>' to '$'"));
    }

    #[test]
    fn test_switching_away_always_yields_defaults() {
        let (directory, _, _) = run(&["symbol MORELINES +", "symbol PROMPT %"]);
        assert_eq!(directory.current().continuation(), '\\');
        assert_eq!(directory.current().prefix(), '|');
    }

    #[test]
    fn test_command_io_failure_is_recoverable() {
        let (_, console, statuses) = run(&["hexdump /no/such/atrium/file"]);
        assert_eq!(statuses, vec![ShellStatus::Continue]);
        assert!(console.output.starts_with("Error: input/output error:"));
    }

    #[test]
    fn test_registry_symbol_command_still_reachable() {
        // Only the PROMPT keyword is intercepted; MORELINES/MULTILINE go
        // through the registry.
        let (directory, console, _) = run(&["symbol MORELINES ;"]);
        assert_eq!(directory.current().continuation(), ';');
        assert!(console.output.contains("Symbol for MORELINES changed"));
    }

    #[test]
    fn test_dispatch_passes_raw_remainder_to_commands() {
        let dir = env::temp_dir().join("atrium-dispatch-args");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("data.txt");
        fs::write(&file, "hello").unwrap();

        let line = format!("cat   {}", file.display());
        let (_, console, _) = run(&[line.as_str()]);
        assert_eq!(console.output, "hello");

        fs::remove_dir_all(dir).unwrap();
    }
}
