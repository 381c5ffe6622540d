use crate::commands::external::exit_code;
use crate::commands::registry::BuiltinCommand;
use crate::errors::{ShellError, ShellResult};
use crate::session::SessionState;
use std::process::Command;

fn run_git(args: &[&str], label: &str) -> ShellResult<i32> {
    let status = Command::new("git")
        .args(args)
        .status()
        .map_err(|e| ShellError::Builtin(format!("{}: git: {}", label, e)))?;
    Ok(exit_code(status))
}

pub struct GitStatusCommand;

impl BuiltinCommand for GitStatusCommand {
    fn name(&self) -> &'static str {
        "git-status"
    }

    fn description(&self) -> &'static str {
        "Show a short git status for the current repository"
    }

    fn execute(&self, _args: &[String], _session: &mut SessionState) -> ShellResult<i32> {
        run_git(&["status", "--short", "--branch"], "git-status")
    }
}

pub struct GitBranchCommand;

impl BuiltinCommand for GitBranchCommand {
    fn name(&self) -> &'static str {
        "git-branch"
    }

    fn description(&self) -> &'static str {
        "List git branches for the current repository"
    }

    fn execute(&self, _args: &[String], _session: &mut SessionState) -> ShellResult<i32> {
        run_git(&["branch"], "git-branch")
    }
}
