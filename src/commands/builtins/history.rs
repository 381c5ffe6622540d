use crate::commands::registry::BuiltinCommand;
use crate::errors::{ShellError, ShellResult};
use crate::history;
use crate::session::SessionState;

pub struct HistoryCommand;

fn file_arg<'a>(args: &'a [String], flag: &str) -> ShellResult<&'a str> {
    args.get(2)
        .map(String::as_str)
        .ok_or_else(|| ShellError::Builtin(format!("history: {}: filename required", flag)))
}

impl BuiltinCommand for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    fn description(&self) -> &'static str {
        "Display or persist command history"
    }

    fn execute(&self, args: &[String], session: &mut SessionState) -> ShellResult<i32> {
        match args.get(1).map(String::as_str) {
            None => {
                print_entries(&session.history, session.history.len());
                Ok(0)
            }
            Some("-r") => {
                let path = file_arg(args, "-r")?;
                let entries = history::read_entries(path)
                    .map_err(|e| ShellError::Builtin(format!("history: {}: {}", path, e)))?;
                session.history.extend(entries);
                Ok(0)
            }
            Some("-w") => {
                let path = file_arg(args, "-w")?;
                history::write_entries(path, &session.history)
                    .map_err(|e| ShellError::Builtin(format!("history: {}: {}", path, e)))?;
                session.history_cursor = session.history.len();
                Ok(0)
            }
            Some("-a") => {
                let path = file_arg(args, "-a")?;
                let new_entries = &session.history[session.history_cursor..];
                history::append_entries(path, new_entries)
                    .map_err(|e| ShellError::Builtin(format!("history: {}: {}", path, e)))?;
                session.history_cursor = session.history.len();
                Ok(0)
            }
            Some(arg) => {
                let limit: usize = arg.parse().map_err(|_| {
                    ShellError::Builtin(format!("history: {}: numeric argument required", arg))
                })?;
                print_entries(&session.history, limit);
                Ok(0)
            }
        }
    }
}

/// Print the last `limit` entries, numbered by absolute position.
fn print_entries(entries: &[String], limit: usize) {
    let start = entries.len().saturating_sub(limit);
    for (index, entry) in entries.iter().enumerate().skip(start) {
        println!("{:5}  {}", index + 1, entry);
    }
}
