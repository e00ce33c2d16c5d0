use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::shell::environment::Environment;

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    InvalidSymbol(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "{}", msg),
            ConfigError::InvalidSymbol(key, value) => write!(
                f,
                "'{}' is not a valid symbol for '{}' (single non-whitespace character expected)",
                value, key
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Startup configuration read from `~/.atriumrc` (or the `--config` path).
/// Recognized keys seed the boot environment's symbols:
///
/// ```text
/// # symbols for the default session
/// prompt = %
/// morelines = +
/// multiline = .
/// ```
pub struct Config {
    prompt: char,
    continuation: char,
    prefix: char,
}

impl Config {
    pub fn load(path_override: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Config {
            prompt: Environment::DEFAULT_PROMPT,
            continuation: Environment::DEFAULT_CONTINUATION,
            prefix: Environment::DEFAULT_PREFIX,
        };

        let path = match path_override {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::home_dir().map(|home| home.join(".atriumrc")),
        };

        if let Some(path) = path {
            if path.exists() {
                config.load_file(&path)?;
                debug!("loaded config from {}", path.display());
            }
        }

        Ok(config)
    }

    pub fn initial_environment(&self) -> Environment {
        let mut env = Environment::new(self.prompt);
        env.set_continuation(self.continuation);
        env.set_prefix(self.prefix);
        env
    }

    fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        for line in content.lines() {
            self.process_line(line)?;
        }
        Ok(())
    }

    fn process_line(&mut self, line: &str) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let Some((key, value)) = line.split_once('=') else {
            warn!("ignoring malformed config line: {}", line);
            return Ok(());
        };
        let key = key.trim();
        let value = strip_quotes(value.trim());

        match key {
            "prompt" => self.prompt = single_symbol(key, value)?,
            "morelines" => self.continuation = single_symbol(key, value)?,
            "multiline" => self.prefix = single_symbol(key, value)?,
            _ => warn!("ignoring unknown config key: {}", key),
        }
        Ok(())
    }
}

fn strip_quotes(value: &str) -> &str {
    let quoted = (value.starts_with('"') && value.ends_with('"'))
        || (value.starts_with('\'') && value.ends_with('\''));
    if quoted && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn single_symbol(key: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) if !symbol.is_whitespace() => Ok(symbol),
        _ => Err(ConfigError::InvalidSymbol(
            key.to_string(),
            value.to_string(),
        )),
    }
}
