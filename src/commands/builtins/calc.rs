use crate::commands::external::exit_code;
use crate::commands::registry::BuiltinCommand;
use crate::errors::{ShellError, ShellResult};
use crate::session::SessionState;
use std::io::Write;
use std::process::{Command, Stdio};

pub struct CalcCommand;

impl BuiltinCommand for CalcCommand {
    fn name(&self) -> &'static str {
        "calc"
    }

    fn description(&self) -> &'static str {
        "Evaluate an arithmetic expression with bc"
    }

    fn execute(&self, args: &[String], _session: &mut SessionState) -> ShellResult<i32> {
        let expr = args[1..].join(" ");
        if expr.is_empty() {
            return Err(ShellError::Builtin("calc: missing expression".to_string()));
        }

        let mut child = Command::new("bc")
            .arg("-l")
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| ShellError::Builtin(format!("calc: bc: {}", e)))?;
        if let Some(mut stdin) = child.stdin.take() {
            let _ = writeln!(stdin, "{}", expr);
        }
        let status = child
            .wait()
            .map_err(|e| ShellError::Builtin(format!("calc: {}", e)))?;
        Ok(exit_code(status))
    }
}
