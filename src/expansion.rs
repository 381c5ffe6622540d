use crate::lexer::{QuoteOrigin, Token, TokenKind};
use crate::session::SessionState;

/// Run the expansion passes over a token stream. Operators pass through
/// untouched; word tokens undergo tilde, variable, and pattern expansion
/// gated by their quote origin, and unquoted tokens that expand to nothing
/// are dropped.
pub fn expand_tokens(tokens: Vec<Token>, session: &SessionState) -> Vec<Token> {
    let mut out = Vec::new();
    for token in tokens {
        if token.kind == TokenKind::Operator {
            out.push(token);
            continue;
        }
        expand_word(token, session, &mut out);
    }
    out
}

fn expand_word(token: Token, session: &SessionState, out: &mut Vec<Token>) {
    let mut text = token.text;

    if token.origin == QuoteOrigin::Unquoted {
        text = expand_tilde(&text, session);
    }
    if token.origin != QuoteOrigin::SingleQuoted {
        text = expand_variables(&text, session);
    }

    if text.is_empty() && !token.origin.is_quoted() {
        return;
    }

    // Pattern expansion applies to unquoted tokens only.
    if token.origin == QuoteOrigin::Unquoted && (text.contains('*') || text.contains('?')) {
        if let Some(matches) = expand_glob(&text) {
            for m in matches {
                out.push(Token::word(m, QuoteOrigin::Unquoted));
            }
            return;
        }
    }

    out.push(Token::word(text, token.origin));
}

/// `~` or `~/...` at the start of an unquoted token becomes $HOME.
pub fn expand_tilde(text: &str, session: &SessionState) -> String {
    if text == "~" || text.starts_with("~/") {
        let home = session.lookup_var("HOME").unwrap_or_default();
        format!("{}{}", home, &text[1..])
    } else {
        text.to_string()
    }
}

/// Substitute `$?`, `$$`, `${NAME}`, and `$NAME` references. Unknown names
/// expand to the empty string; a `$` that introduces nothing stays literal.
pub fn expand_variables(text: &str, session: &SessionState) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '$' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match chars.get(i + 1) {
            Some('?') => {
                out.push_str(&session.last_status.to_string());
                i += 2;
            }
            Some('$') => {
                out.push_str(&std::process::id().to_string());
                i += 2;
            }
            Some('{') => match chars[i + 2..].iter().position(|&c| c == '}') {
                Some(rel) => {
                    let name: String = chars[i + 2..i + 2 + rel].iter().collect();
                    out.push_str(&session.lookup_var(&name).unwrap_or_default());
                    i += rel + 3;
                }
                None => {
                    // Missing closing brace: the ${ expands to nothing and
                    // the remainder passes through literally.
                    out.extend(&chars[i + 2..]);
                    return out;
                }
            },
            Some(c) if c.is_ascii_alphabetic() || *c == '_' => {
                let mut end = i + 2;
                while end < chars.len()
                    && (chars[end].is_ascii_alphanumeric() || chars[end] == '_')
                {
                    end += 1;
                }
                let name: String = chars[i + 1..end].iter().collect();
                out.push_str(&session.lookup_var(&name).unwrap_or_default());
                i = end;
            }
            _ => {
                out.push('$');
                i += 1;
            }
        }
    }
    out
}

/// Glob the token against the filesystem. Returns the sorted matches, or
/// None when nothing matched (the caller passes the token through
/// literally, as shells do).
fn expand_glob(pattern: &str) -> Option<Vec<String>> {
    let paths = glob::glob(pattern).ok()?;
    let matches: Vec<String> = paths
        .filter_map(|p| p.ok())
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    if matches.is_empty() {
        None
    } else {
        Some(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use std::fs::File;

    fn session_with(vars: &[(&str, &str)]) -> SessionState {
        let mut session = SessionState::new();
        for (name, value) in vars {
            session.set_var(name, value);
        }
        session
    }

    fn expand_line(line: &str, session: &SessionState) -> Vec<String> {
        let tokens = tokenize(line).unwrap();
        expand_tokens(tokens, session)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn double_quoted_variables_expand() {
        let session = session_with(&[("X", "foo")]);
        assert_eq!(expand_line("echo \"$X\"", &session), vec!["echo", "foo"]);
    }

    #[test]
    fn single_quoted_variables_do_not_expand() {
        let session = session_with(&[("X", "foo")]);
        assert_eq!(expand_line("echo '$X'", &session), vec!["echo", "$X"]);
    }

    #[test]
    fn braced_and_bare_names() {
        let session = session_with(&[("VAR", "v"), ("VAR2", "w")]);
        assert_eq!(
            expand_line("echo ${VAR}x $VAR2", &session),
            vec!["echo", "vx", "w"]
        );
    }

    #[test]
    fn missing_closing_brace_drops_reference() {
        let session = session_with(&[("X", "foo")]);
        assert_eq!(expand_variables("${X", &session), "X");
    }

    #[test]
    fn status_and_pid_references() {
        let mut session = SessionState::new();
        session.last_status = 42;
        assert_eq!(expand_variables("$?", &session), "42");
        assert_eq!(
            expand_variables("$$", &session),
            std::process::id().to_string()
        );
    }

    #[test]
    fn lone_dollar_is_literal() {
        let session = SessionState::new();
        assert_eq!(expand_variables("a$", &session), "a$");
        assert_eq!(expand_variables("$1x", &session), "$1x");
    }

    #[test]
    fn unknown_variable_expands_empty() {
        let session = SessionState::new();
        assert_eq!(expand_variables("<$MYSHELL_NO_SUCH_VAR>", &session), "<>");
    }

    #[test]
    fn unquoted_empty_expansion_is_dropped() {
        let session = SessionState::new();
        assert_eq!(
            expand_line("echo $MYSHELL_NO_SUCH_VAR end", &session),
            vec!["echo", "end"]
        );
    }

    #[test]
    fn quoted_empty_expansion_survives() {
        let session = SessionState::new();
        assert_eq!(
            expand_line("echo \"$MYSHELL_NO_SUCH_VAR\" ''", &session),
            vec!["echo", "", ""]
        );
    }

    #[test]
    fn tilde_expands_for_unquoted_tokens_only() {
        let session = session_with(&[("HOME", "/home/me")]);
        assert_eq!(
            expand_line("ls ~ ~/x '~'", &session),
            vec!["ls", "/home/me", "/home/me/x", "~"]
        );
        // Mid-token tilde is untouched.
        assert_eq!(expand_line("echo a~b", &session), vec!["echo", "a~b"]);
    }

    #[test]
    fn glob_expands_sorted_and_falls_through() {
        let dir = std::env::temp_dir().join(format!("myshell_glob_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        File::create(dir.join("b.txt")).unwrap();
        File::create(dir.join("a.txt")).unwrap();

        let session = SessionState::new();
        let pattern = format!("{}/*.txt", dir.display());
        let args = expand_line(&format!("ls {}", pattern), &session);
        assert_eq!(args.len(), 3);
        assert!(args[1].ends_with("a.txt"));
        assert!(args[2].ends_with("b.txt"));

        // No matches: the pattern passes through literally.
        let miss = format!("{}/*.none", dir.display());
        let args = expand_line(&format!("ls {}", miss), &session);
        assert_eq!(args, vec!["ls".to_string(), miss]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn quoted_glob_characters_stay_literal() {
        let session = SessionState::new();
        assert_eq!(expand_line("echo '*.c' \"*.c\"", &session), vec!["echo", "*.c", "*.c"]);
    }

    #[test]
    fn variable_expansion_feeds_pattern_expansion() {
        // X='*.zzz_none' ; unquoted $X globs (and falls through on no
        // match), while "$X" must not glob at all.
        let session = session_with(&[("X", "*.zzz_none")]);
        assert_eq!(
            expand_line("ls $X \"$X\"", &session),
            vec!["ls", "*.zzz_none", "*.zzz_none"]
        );
    }
}
