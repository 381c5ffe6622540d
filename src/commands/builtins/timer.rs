use crate::commands::external::exit_code;
use crate::commands::registry::BuiltinCommand;
use crate::errors::{ShellError, ShellResult};
use crate::session::SessionState;
use std::process::Command;

pub struct TimerCommand;

impl BuiltinCommand for TimerCommand {
    fn name(&self) -> &'static str {
        "timer"
    }

    fn description(&self) -> &'static str {
        "Sleep for the given number of seconds, then report"
    }

    fn execute(&self, args: &[String], _session: &mut SessionState) -> ShellResult<i32> {
        let Some(arg) = args.get(1) else {
            return Err(ShellError::Builtin("timer: missing duration".to_string()));
        };
        if arg.parse::<f64>().is_err() {
            return Err(ShellError::Builtin(format!(
                "timer: {}: numeric argument required",
                arg
            )));
        }

        let status = Command::new("sleep")
            .arg(arg)
            .status()
            .map_err(|e| ShellError::Builtin(format!("timer: sleep: {}", e)))?;
        let code = exit_code(status);
        if code == 0 {
            println!("timer: {}s elapsed", arg);
        }
        Ok(code)
    }
}
