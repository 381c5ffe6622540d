use crate::commands::BUILTINS;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::env;
use std::fs;

/// Shell completer for tab completion of command names. Candidates are
/// offered only for the first word of the line (completion start at
/// column 0): builtin names plus every executable basename on PATH.
#[derive(Clone)]
pub struct ShellCompleter;

/// Collect command-name candidates for a prefix, sorted and deduplicated.
pub fn command_candidates(prefix: &str) -> Vec<String> {
    let mut candidates: Vec<String> = BUILTINS
        .builtin_names()
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .map(|name| name.to_string())
        .collect();

    if let Ok(path_var) = env::var("PATH") {
        for dir in path_var.split(':') {
            if dir.is_empty() {
                continue;
            }
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let Ok(file_name) = entry.file_name().into_string() else {
                    continue;
                };
                if !file_name.starts_with(prefix) {
                    continue;
                }
                if let Ok(metadata) = entry.metadata() {
                    use std::os::unix::fs::PermissionsExt;
                    if metadata.is_file() && metadata.permissions().mode() & 0o111 != 0 {
                        candidates.push(file_name);
                    }
                }
            }
        }
    }

    candidates.sort();
    candidates.dedup();
    candidates
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];

        // Only the command word itself completes; anything after the first
        // whitespace is left alone.
        if prefix.chars().any(char::is_whitespace) {
            return Ok((pos, vec![]));
        }

        let mut candidates: Vec<Pair> = command_candidates(prefix)
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();

        // A unique match gets a trailing space so typing can continue.
        if candidates.len() == 1 {
            candidates[0].replacement.push(' ');
        }

        Ok((0, candidates))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> std::borrow::Cow<'l, str> {
        std::borrow::Cow::Borrowed(line)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> std::borrow::Cow<'b, str> {
        std::borrow::Cow::Borrowed(prompt)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> std::borrow::Cow<'h, str> {
        std::borrow::Cow::Borrowed(hint)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: CmdKind) -> bool {
        false
    }
}

impl Validator for ShellCompleter {}

impl Helper for ShellCompleter {}
