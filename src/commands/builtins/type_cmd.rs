use crate::commands::external::find_executable;
use crate::commands::registry::{BuiltinCommand, BUILTINS};
use crate::errors::ShellResult;
use crate::session::SessionState;

pub struct TypeCommand;

impl BuiltinCommand for TypeCommand {
    fn name(&self) -> &'static str {
        "type"
    }

    fn description(&self) -> &'static str {
        "Print the type of a command"
    }

    fn execute(&self, args: &[String], _session: &mut SessionState) -> ShellResult<i32> {
        let mut status = 0;
        for name in &args[1..] {
            if BUILTINS.is_builtin(name) {
                println!("{} is a shell builtin", name);
            } else if let Some(path) = find_executable(name) {
                println!("{} is {}", name, path.display());
            } else {
                println!("{}: not found", name);
                status = 1;
            }
        }
        Ok(status)
    }
}
