pub mod bookmarks;
pub mod commands;
pub mod completion;
pub mod errors;
pub mod expansion;
pub mod history;
pub mod lexer;
pub mod pipeline;
pub mod redirection;
pub mod repl;
pub mod session;
pub mod splitter;

use completion::ShellCompleter;
use errors::ShellError;
use repl::{read_input, run_line, ShellEditor};
use rustyline::config::Configurer;
use rustyline::{ColorMode, Config, Editor};
use session::SessionState;
use std::env;

/// Main entry point for the shell session loop. Returns the process exit
/// code: the argument given to `exit`, or the last status at end-of-input.
pub fn run_shell() -> i32 {
    let mut session = SessionState::new();
    session.bookmarks = bookmarks::load();

    let histfile = env::var("HISTFILE").ok();
    if let Some(path) = &histfile {
        if let Ok(entries) = history::read_entries(path) {
            session.history = entries;
            // Entries loaded from disk are already persisted.
            session.history_cursor = session.history.len();
        }
    }

    let config = Config::builder().color_mode(ColorMode::Enabled).build();
    let mut rl: ShellEditor = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("myshell: failed to initialize line editor: {}", e);
            return 1;
        }
    };
    rl.set_helper(Some(ShellCompleter));
    rl.set_completion_type(rustyline::CompletionType::List);
    for entry in &session.history {
        let _ = rl.add_history_entry(entry);
    }

    loop {
        match read_input(&mut rl) {
            Ok(line) => {
                // The line goes to history before execution so a failed
                // command can still be recalled.
                session.add_to_history(&line);
                let _ = rl.add_history_entry(&line);
                if line.starts_with('#') {
                    continue;
                }
                run_line(&line, &mut session);
                if session.pending_exit.is_some() {
                    break;
                }
            }
            Err(ShellError::Interrupted) => {
                // Ctrl-D pressed, exit gracefully
                break;
            }
            Err(e) => {
                eprintln!("{}", e);
            }
        }
    }

    if let Some(path) = &histfile {
        let _ = history::write_entries(path, &session.history);
    }

    session.pending_exit.unwrap_or(session.last_status)
}
