use crate::errors::ShellError;
use crate::pipeline::CommandStage;
use crate::redirection;
use std::env;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Resolve a command name to an executable path. Names containing `/` are
/// used directly; everything else is searched for along `PATH`, skipping
/// empty entries, taking the first regular file with an execute bit.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    if name.contains('/') {
        let path = Path::new(name);
        if is_executable_file(path) {
            return Some(path.to_path_buf());
        }
        return None;
    }

    let path_var = env::var("PATH").ok()?;
    find_in_path_var(name, &path_var)
}

fn find_in_path_var(name: &str, path_var: &str) -> Option<PathBuf> {
    for dir in path_var.split(':') {
        if dir.is_empty() {
            continue;
        }
        let candidate = Path::new(dir).join(name);
        if is_executable_file(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn is_executable_file(path: &Path) -> bool {
    match path.metadata() {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// Translate a wait status into a shell exit code; death by signal maps to
/// 128 + the signal number.
pub fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match status.code() {
        Some(code) => code,
        None => match status.signal() {
            Some(signal) => 128 + signal,
            None => 1,
        },
    }
}

/// Run an external command as a standalone stage, inheriting the shell's
/// stdio except where redirected. Blocks until the child exits.
pub fn run_external(stage: &CommandStage) -> i32 {
    let name = &stage.argv[0];
    let Some(path) = find_executable(name) else {
        let e = ShellError::CommandNotFound(name.clone());
        // On stdout so the message stays visible across pipes.
        println!("{}", e);
        return e.status();
    };

    let mut cmd = Command::new(&path);
    cmd.args(&stage.argv[1..]);
    if let Err(e) = redirection::apply_to_command(&mut cmd, &stage.redirs) {
        eprintln!("{}", e);
        return 1;
    }

    match cmd.status() {
        Ok(status) => exit_code(status),
        Err(e) => {
            eprintln!("myshell: {}: {}", name, e);
            127
        }
    }
}
