use crate::completion::ShellCompleter;
use crate::errors::{ShellError, ShellResult};
use crate::expansion::{expand_tilde, expand_tokens, expand_variables};
use crate::lexer::{tokenize, QuoteOrigin, TokenKind};
use crate::pipeline::{compose, execute_pipeline};
use crate::session::{is_valid_name, SessionState};
use crate::splitter::{split_statements, JoinOp};
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;

pub type ShellEditor = Editor<ShellCompleter, FileHistory>;

/// Read one non-empty input line. Ctrl-C starts a fresh prompt; Ctrl-D is
/// end-of-input.
pub fn read_input(rl: &mut ShellEditor) -> ShellResult<String> {
    loop {
        match rl.readline("$ ") {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    return Ok(trimmed.to_string());
                }
            }
            Err(ReadlineError::Interrupted) => {
                continue;
            }
            Err(ReadlineError::Eof) => {
                return Err(ShellError::Interrupted);
            }
            Err(e) => {
                return Err(ShellError::Input(format!("readline error: {}", e)));
            }
        }
    }
}

/// Run one input line: split it into statements, apply `&&`/`||`
/// short-circuiting against the running status, and execute each segment.
pub fn run_line(line: &str, session: &mut SessionState) {
    for (segment, join) in split_statements(line) {
        match join {
            JoinOp::AndThen if session.last_status != 0 => continue,
            JoinOp::OrElse if session.last_status == 0 => continue,
            _ => {}
        }
        session.last_status = run_segment(&segment, session);
        if session.pending_exit.is_some() {
            break;
        }
    }
}

fn run_segment(segment: &str, session: &mut SessionState) -> i32 {
    if let Some(status) = try_assignment(segment, session) {
        return status;
    }

    let tokens = match tokenize(segment) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", e);
            return e.status();
        }
    };
    let tokens = expand_tokens(tokens, session);
    if tokens.is_empty() {
        return 0;
    }

    let stages = match compose(&tokens) {
        Ok(stages) => stages,
        Err(e) => {
            eprintln!("{}", e);
            return e.status();
        }
    };
    execute_pipeline(&stages, session)
}

/// A segment that is a single top-level `NAME=VALUE` records a shell
/// variable instead of executing. The value is expanded (variables and
/// tilde, no globbing) honoring its own quoting.
fn try_assignment(segment: &str, session: &mut SessionState) -> Option<i32> {
    let trimmed = segment.trim();
    let eq = trimmed.find('=')?;
    let name = &trimmed[..eq];
    if !is_valid_name(name) {
        return None;
    }

    let value_text = &trimmed[eq + 1..];
    if value_text.starts_with([' ', '\t']) {
        // `X= foo` is not a plain assignment.
        return None;
    }

    let tokens = tokenize(value_text).ok()?;
    if tokens.len() > 1 || tokens.iter().any(|t| t.kind == TokenKind::Operator) {
        return None;
    }

    let value = match tokens.into_iter().next() {
        Some(token) => {
            let mut text = token.text;
            if token.origin == QuoteOrigin::Unquoted {
                text = expand_tilde(&text, session);
            }
            if token.origin != QuoteOrigin::SingleQuoted {
                text = expand_variables(&text, session);
            }
            text
        }
        None => String::new(),
    };
    session.set_var(name, &value);
    Some(0)
}
