use crate::commands::registry::BuiltinCommand;
use crate::errors::ShellResult;
use crate::session::SessionState;
use std::env;

pub struct PwdCommand;

impl BuiltinCommand for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn description(&self) -> &'static str {
        "Print current working directory"
    }

    fn execute(&self, _args: &[String], _session: &mut SessionState) -> ShellResult<i32> {
        let current_dir = env::current_dir()?;
        println!("{}", current_dir.display());
        Ok(0)
    }
}
