use std::collections::{BTreeMap, HashMap};
use std::env;

/// All mutable shell state, owned by the session loop and threaded through
/// dispatch. Cloning is cheap enough for the forked-builtin scratch copies.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Shell variables; shadow the process environment on lookup.
    pub vars: HashMap<String, String>,
    /// Exit status of the most recently completed statement.
    pub last_status: i32,
    /// Directory bookmarks, kept sorted for stable listing output.
    pub bookmarks: BTreeMap<String, String>,
    /// Every non-empty input line, in order.
    pub history: Vec<String>,
    /// Index of the first history entry not yet persisted by `-w`/`-a`.
    pub history_cursor: usize,
    /// Set by the `exit` builtin; the loop breaks when this is Some.
    pub pending_exit: Option<i32>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            vars: HashMap::new(),
            last_status: 0,
            bookmarks: BTreeMap::new(),
            history: Vec::new(),
            history_cursor: 0,
            pending_exit: None,
        }
    }

    /// Look up a variable: shell variables first, then the environment.
    pub fn lookup_var(&self, name: &str) -> Option<String> {
        if let Some(value) = self.vars.get(name) {
            return Some(value.clone());
        }
        env::var(name).ok()
    }

    pub fn set_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    pub fn add_to_history(&mut self, line: &str) {
        if !line.is_empty() {
            self.history.push(line.to_string());
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `name` is a valid shell variable name.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(is_valid_name("X"));
        assert!(is_valid_name("_under"));
        assert!(is_valid_name("PATH2"));
    }

    #[test]
    fn invalid_names() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("2start"));
        assert!(!is_valid_name("has-dash"));
        assert!(!is_valid_name("has space"));
    }

    #[test]
    fn shell_vars_shadow_environment() {
        let mut session = SessionState::new();
        env::set_var("MYSHELL_TEST_SHADOW", "from_env");
        assert_eq!(
            session.lookup_var("MYSHELL_TEST_SHADOW").as_deref(),
            Some("from_env")
        );
        session.set_var("MYSHELL_TEST_SHADOW", "from_shell");
        assert_eq!(
            session.lookup_var("MYSHELL_TEST_SHADOW").as_deref(),
            Some("from_shell")
        );
        env::remove_var("MYSHELL_TEST_SHADOW");
    }

    #[test]
    fn missing_var_is_none() {
        let session = SessionState::new();
        assert!(session.lookup_var("MYSHELL_TEST_MISSING").is_none());
    }
}
