use crate::commands::registry::BuiltinCommand;
use crate::errors::ShellResult;
use crate::session::SessionState;
use std::env;

pub struct EnvCommand;

impl BuiltinCommand for EnvCommand {
    fn name(&self) -> &'static str {
        "env"
    }

    fn description(&self) -> &'static str {
        "Print the process environment"
    }

    fn execute(&self, _args: &[String], _session: &mut SessionState) -> ShellResult<i32> {
        for (name, value) in env::vars() {
            println!("{}={}", name, value);
        }
        Ok(0)
    }
}
