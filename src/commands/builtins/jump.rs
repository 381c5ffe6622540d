use crate::commands::registry::BuiltinCommand;
use crate::errors::{ShellError, ShellResult};
use crate::session::SessionState;
use std::env;

pub struct JumpCommand;

impl BuiltinCommand for JumpCommand {
    fn name(&self) -> &'static str {
        "jump"
    }

    fn description(&self) -> &'static str {
        "Change directory to a bookmark"
    }

    fn execute(&self, args: &[String], session: &mut SessionState) -> ShellResult<i32> {
        let Some(name) = args.get(1) else {
            return Err(ShellError::Builtin("jump: missing bookmark name".to_string()));
        };
        let Some(path) = session.bookmarks.get(name) else {
            return Err(ShellError::Builtin(format!("jump: {}: no such bookmark", name)));
        };
        env::set_current_dir(path).map_err(|_| {
            ShellError::Builtin(format!("jump: {}: No such file or directory", path))
        })?;
        Ok(0)
    }
}
