use crate::commands::registry::BuiltinCommand;
use crate::errors::{ShellError, ShellResult};
use crate::session::{is_valid_name, SessionState};
use std::env;

pub struct ExportCommand;

impl BuiltinCommand for ExportCommand {
    fn name(&self) -> &'static str {
        "export"
    }

    fn description(&self) -> &'static str {
        "Set a shell variable and export it to the environment"
    }

    fn execute(&self, args: &[String], session: &mut SessionState) -> ShellResult<i32> {
        if args.len() < 2 {
            return Err(ShellError::Builtin(
                "export: expected NAME=VALUE or NAME".to_string(),
            ));
        }

        for arg in &args[1..] {
            match arg.split_once('=') {
                Some((name, value)) => {
                    if !is_valid_name(name) {
                        return Err(ShellError::Builtin(format!(
                            "export: {}: not a valid identifier",
                            name
                        )));
                    }
                    session.set_var(name, value);
                    env::set_var(name, value);
                }
                None => {
                    if !is_valid_name(arg) {
                        return Err(ShellError::Builtin(format!(
                            "export: {}: not a valid identifier",
                            arg
                        )));
                    }
                    // Bare NAME exports an existing shell variable.
                    if let Some(value) = session.vars.get(arg).cloned() {
                        env::set_var(arg, value);
                    }
                }
            }
        }
        Ok(0)
    }
}
