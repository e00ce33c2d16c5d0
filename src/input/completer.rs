use rustyline::completion::{Completer, Pair};
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::commands::Registry;
use crate::highlight::MessageStyler;

#[derive(Clone)]
pub struct ShellCompleter {
    commands: Vec<&'static str>,
}

impl Default for ShellCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellCompleter {
    pub fn new() -> Self {
        // The registry is fixed at startup, so the candidate list is too.
        ShellCompleter {
            commands: Registry::new().names().collect(),
        }
    }

    fn complete_command(&self, word: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|name| name.starts_with(word))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: format!("{} ", name),
            })
            .collect()
    }

    fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_to_search, file_prefix) = split_path_input(incomplete);

        let mut matches = Vec::new();
        if let Ok(entries) = fs::read_dir(&dir_to_search) {
            for entry in entries.filter_map(Result::ok) {
                let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                    continue;
                };
                if !name.starts_with(&file_prefix) {
                    continue;
                }

                let mut replacement = if dir_to_search == Path::new(".") {
                    name.clone()
                } else {
                    dir_to_search.join(&name).to_string_lossy().into_owned()
                };
                if entry.path().is_dir() {
                    replacement.push('/');
                }
                matches.push(Pair {
                    display: replacement.clone(),
                    replacement,
                });
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

fn split_path_input(incomplete: &str) -> (PathBuf, String) {
    if incomplete.is_empty() {
        return (PathBuf::from("."), String::new());
    }
    if incomplete.ends_with('/') {
        return (PathBuf::from(incomplete), String::new());
    }

    let path = Path::new(incomplete);
    let prefix = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (dir, prefix)
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(MessageStyler::new().highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];

        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();
        if line_up_to_cursor.ends_with(' ') {
            words.push("");
        }

        match words.len() {
            0 => Ok((0, self.complete_command(""))),
            1 => {
                let word = words[0];
                let start = line_up_to_cursor.rfind(word).unwrap_or(0);
                Ok((start, self.complete_command(word)))
            }
            _ => {
                let last_word = words.last().copied().unwrap_or("");
                let start = if last_word.is_empty() {
                    pos
                } else {
                    line_up_to_cursor.rfind(last_word).unwrap_or(pos)
                };
                Ok((start, self.complete_path(last_word)))
            }
        }
    }
}
