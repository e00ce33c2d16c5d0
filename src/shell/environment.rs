use std::collections::BTreeMap;

/// Per-session display and control symbols. The prompt character doubles as
/// the environment's identity in the [`EnvironmentDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    prompt: char,
    continuation: char,
    prefix: char,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROMPT)
    }
}

impl Environment {
    pub const DEFAULT_PROMPT: char = '>';
    pub const DEFAULT_CONTINUATION: char = '\\';
    pub const DEFAULT_PREFIX: char = '|';

    /// Invariant: the prompt character is never whitespace, since it keys
    /// the directory and is tokenized out of `symbol PROMPT` lines.
    pub fn new(prompt: char) -> Self {
        debug_assert!(!prompt.is_whitespace());
        Environment {
            prompt,
            continuation: Self::DEFAULT_CONTINUATION,
            prefix: Self::DEFAULT_PREFIX,
        }
    }

    pub fn prompt(&self) -> char {
        self.prompt
    }

    pub fn continuation(&self) -> char {
        self.continuation
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    pub fn set_continuation(&mut self, symbol: char) {
        self.continuation = symbol;
    }

    pub fn set_prefix(&mut self, symbol: char) {
        self.prefix = symbol;
    }
}

/// Outcome of a prompt switch, for reporting the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch {
    pub from: char,
    pub to: char,
    pub created: bool,
}

/// All environments seen this session, keyed by prompt character, plus the
/// one currently driving the loop. Environments are never removed; switching
/// back to a previously used prompt resumes its saved symbols.
#[derive(Debug)]
pub struct EnvironmentDirectory {
    current: Environment,
    saved: BTreeMap<char, Environment>,
}

impl EnvironmentDirectory {
    pub fn new(initial: Environment) -> Self {
        let mut saved = BTreeMap::new();
        saved.insert(initial.prompt(), initial.clone());
        EnvironmentDirectory {
            current: initial,
            saved,
        }
    }

    pub fn current(&self) -> &Environment {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Environment {
        &mut self.current
    }

    /// Writes the current environment back under its prompt key, then makes
    /// the environment keyed by `target` current. Unseen characters get a
    /// fresh default-configured environment, never a clone of the one being
    /// left.
    pub fn switch_to(&mut self, target: char) -> Switch {
        let from = self.current.prompt();
        self.saved.insert(from, self.current.clone());

        let (env, created) = match self.saved.get(&target) {
            Some(saved) => (saved.clone(), false),
            None => (Environment::new(target), true),
        };
        self.current = env;
        self.saved.insert(target, self.current.clone());

        Switch {
            from,
            to: target,
            created,
        }
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_symbols() {
        let env = Environment::default();
        assert_eq!(env.prompt(), '>');
        assert_eq!(env.continuation(), '\\');
        assert_eq!(env.prefix(), '|');
    }

    #[test]
    fn test_switch_creates_fresh_environment() {
        let mut directory = EnvironmentDirectory::new(Environment::default());
        directory.current_mut().set_continuation('+');
        directory.current_mut().set_prefix('.');

        let switch = directory.switch_to('$');
        assert_eq!(switch, Switch { from: '>', to: '$', created: true });

        // New environments carry defaults, not the symbols being left.
        assert_eq!(directory.current().prompt(), '$');
        assert_eq!(directory.current().continuation(), Environment::DEFAULT_CONTINUATION);
        assert_eq!(directory.current().prefix(), Environment::DEFAULT_PREFIX);
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_switch_back_restores_saved_symbols() {
        let mut directory = EnvironmentDirectory::new(Environment::default());
        directory.current_mut().set_continuation('+');
        directory.current_mut().set_prefix('.');

        directory.switch_to('$');
        directory.current_mut().set_continuation('#');

        let switch = directory.switch_to('>');
        assert_eq!(switch, Switch { from: '$', to: '>', created: false });
        assert_eq!(directory.current().continuation(), '+');
        assert_eq!(directory.current().prefix(), '.');

        let switch = directory.switch_to('$');
        assert!(!switch.created);
        assert_eq!(directory.current().continuation(), '#');
    }

    #[test]
    fn test_switch_to_current_prompt_is_idempotent() {
        let mut directory = EnvironmentDirectory::new(Environment::default());
        directory.current_mut().set_continuation('+');

        let switch = directory.switch_to('>');
        assert_eq!(switch, Switch { from: '>', to: '>', created: false });
        assert_eq!(directory.current().continuation(), '+');
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_directory_tracks_every_prompt_seen() {
        let mut directory = EnvironmentDirectory::new(Environment::default());
        for prompt in ['$', '%', '#'] {
            directory.switch_to(prompt);
        }
        assert_eq!(directory.len(), 4);
        assert!(!directory.is_empty());
    }
}
