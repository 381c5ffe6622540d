use crate::commands::registry::BuiltinCommand;
use crate::errors::{ShellError, ShellResult};
use crate::session::SessionState;

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exit the shell"
    }

    fn execute(&self, args: &[String], session: &mut SessionState) -> ShellResult<i32> {
        let code = match args.get(1) {
            Some(arg) => arg.parse::<i32>().map_err(|_| {
                ShellError::Builtin(format!("exit: {}: numeric argument required", arg))
            })?,
            None => 0,
        };
        session.pending_exit = Some(code);
        Ok(code)
    }
}
