use crate::commands::registry::BuiltinCommand;
use crate::errors::ShellResult;
use crate::session::SessionState;
use std::env;

pub struct UnsetCommand;

impl BuiltinCommand for UnsetCommand {
    fn name(&self) -> &'static str {
        "unset"
    }

    fn description(&self) -> &'static str {
        "Remove shell variables from the session and environment"
    }

    fn execute(&self, args: &[String], session: &mut SessionState) -> ShellResult<i32> {
        for name in &args[1..] {
            session.vars.remove(name);
            env::remove_var(name);
        }
        Ok(0)
    }
}
