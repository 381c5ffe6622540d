use crate::commands::registry::BuiltinCommand;
use crate::errors::{ShellError, ShellResult};
use crate::session::SessionState;
use std::env;

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn description(&self) -> &'static str {
        "Change current working directory"
    }

    fn execute(&self, args: &[String], session: &mut SessionState) -> ShellResult<i32> {
        let Some(path) = args.get(1) else {
            return Err(ShellError::Builtin("cd: missing argument".to_string()));
        };

        let target = if path == "~" || path.starts_with("~/") {
            match session.lookup_var("HOME") {
                Some(home) => format!("{}{}", home, &path[1..]),
                None => {
                    return Err(ShellError::Builtin("cd: HOME not set".to_string()));
                }
            }
        } else {
            path.clone()
        };

        env::set_current_dir(&target).map_err(|_| {
            ShellError::Builtin(format!("cd: {}: No such file or directory", target))
        })?;
        Ok(0)
    }
}
