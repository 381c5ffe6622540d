use crate::errors::{ShellError, ShellResult};
use crate::lexer::{Token, TokenKind};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, FromRawFd};
use std::process::{Command, Stdio};

/// Redirection mode (truncate or append)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirMode {
    Truncate,
    Append,
}

/// One redirection of fd 1 or 2 onto a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub fd: u8,
    pub target: String,
    pub mode: RedirMode,
}

fn redirect_operator(op: &str) -> Option<(u8, RedirMode)> {
    match op {
        ">" | "1>" => Some((1, RedirMode::Truncate)),
        ">>" | "1>>" => Some((1, RedirMode::Append)),
        "2>" => Some((2, RedirMode::Truncate)),
        "2>>" => Some((2, RedirMode::Append)),
        _ => None,
    }
}

/// Pull redirection operators (and their targets) out of one stage's token
/// stream, leaving argv behind. Redirections keep their textual order so
/// that applying them in sequence makes the last one per fd win while every
/// named target still gets created.
pub fn parse_redirections(tokens: &[Token]) -> ShellResult<(Vec<String>, Vec<Redirection>)> {
    let mut argv = Vec::new();
    let mut redirs = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        if token.kind == TokenKind::Operator {
            if let Some((fd, mode)) = redirect_operator(&token.text) {
                let target = match tokens.get(i + 1) {
                    Some(next) if next.kind == TokenKind::Word => next.text.clone(),
                    _ => {
                        return Err(ShellError::Syntax(format!(
                            "expected redirection target after '{}'",
                            token.text
                        )))
                    }
                };
                if target.is_empty() {
                    return Err(ShellError::Syntax(format!(
                        "empty redirection target after '{}'",
                        token.text
                    )));
                }
                redirs.push(Redirection { fd, target, mode });
                i += 2;
                continue;
            }
        }
        argv.push(token.text.clone());
        i += 1;
    }

    Ok((argv, redirs))
}

/// Open a redirection target: write + create, truncate or append, 0644.
pub fn open_target(redir: &Redirection) -> ShellResult<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(redir.mode == RedirMode::Truncate)
        .append(redir.mode == RedirMode::Append)
        .mode(0o644)
        .open(&redir.target)
        .map_err(|e| ShellError::Redirection(format!("{}: {}", redir.target, e)))
}

/// Apply a stage's redirections to a child about to be spawned. Every
/// target is opened in order; the last file per fd becomes the child's
/// handle, so `> a > b` truncates both but writes to b.
pub fn apply_to_command(cmd: &mut Command, redirs: &[Redirection]) -> ShellResult<()> {
    let mut stdout_file = None;
    let mut stderr_file = None;
    for redir in redirs {
        let file = open_target(redir)?;
        match redir.fd {
            1 => stdout_file = Some(file),
            _ => stderr_file = Some(file),
        }
    }
    if let Some(file) = stdout_file {
        cmd.stdout(Stdio::from(file));
    }
    if let Some(file) = stderr_file {
        cmd.stderr(Stdio::from(file));
    }
    Ok(())
}

/// Apply redirections inside an already-forked child by duplicating each
/// opened target onto its fd. Diagnoses and returns false on failure so the
/// child can exit 1.
pub fn apply_in_child(redirs: &[Redirection]) -> bool {
    for redir in redirs {
        match open_target(redir) {
            Ok(file) => unsafe {
                libc::dup2(file.as_raw_fd(), redir.fd as i32);
            },
            Err(e) => {
                eprintln!("{}", e);
                return false;
            }
        }
    }
    true
}

/// Guard that restores the shell's own stdout/stderr when dropped. Used
/// when a builtin runs in-process with redirections.
pub struct RedirectionGuard {
    saved_stdout: Option<File>,
    saved_stderr: Option<File>,
}

impl Drop for RedirectionGuard {
    fn drop(&mut self) {
        // Flush before restoring so buffered output lands in the target.
        let _ = io::Write::flush(&mut io::stdout());
        let _ = io::Write::flush(&mut io::stderr());

        if let Some(saved) = self.saved_stdout.take() {
            unsafe {
                libc::dup2(saved.as_raw_fd(), libc::STDOUT_FILENO);
            }
        }
        if let Some(saved) = self.saved_stderr.take() {
            unsafe {
                libc::dup2(saved.as_raw_fd(), libc::STDERR_FILENO);
            }
        }
    }
}

/// Redirect the current process's fds for a builtin, saving the originals.
/// The returned guard restores them when dropped.
pub fn redirect_current_process(redirs: &[Redirection]) -> ShellResult<RedirectionGuard> {
    let mut guard = RedirectionGuard {
        saved_stdout: None,
        saved_stderr: None,
    };

    for redir in redirs {
        let target_fd = redir.fd as i32;
        let saved = if redir.fd == 1 {
            &mut guard.saved_stdout
        } else {
            &mut guard.saved_stderr
        };
        if saved.is_none() {
            let saved_fd = unsafe { libc::dup(target_fd) };
            if saved_fd >= 0 {
                *saved = Some(unsafe { File::from_raw_fd(saved_fd) });
            }
        }

        // Open after saving so a failed open leaves the fd table intact;
        // the guard drop then restores anything already redirected.
        let file = open_target(redir)?;
        unsafe {
            libc::dup2(file.as_raw_fd(), target_fd);
        }
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(line: &str) -> ShellResult<(Vec<String>, Vec<Redirection>)> {
        parse_redirections(&tokenize(line).unwrap())
    }

    #[test]
    fn stdout_truncate_and_append() {
        let (argv, redirs) = parse("cmd a > out").unwrap();
        assert_eq!(argv, vec!["cmd", "a"]);
        assert_eq!(
            redirs,
            vec![Redirection {
                fd: 1,
                target: "out".into(),
                mode: RedirMode::Truncate
            }]
        );

        let (_, redirs) = parse("cmd >> out").unwrap();
        assert_eq!(redirs[0].mode, RedirMode::Append);
    }

    #[test]
    fn stderr_forms() {
        let (argv, redirs) = parse("cmd 2> err 2>> err2").unwrap();
        assert_eq!(argv, vec!["cmd"]);
        assert_eq!(redirs.len(), 2);
        assert_eq!(redirs[0].fd, 2);
        assert_eq!(redirs[0].mode, RedirMode::Truncate);
        assert_eq!(redirs[1].mode, RedirMode::Append);
    }

    #[test]
    fn explicit_fd_one_forms() {
        let (_, redirs) = parse("cmd 1> a 1>> b").unwrap();
        assert_eq!(redirs[0].fd, 1);
        assert_eq!(redirs[1].fd, 1);
        assert_eq!(redirs[1].mode, RedirMode::Append);
    }

    #[test]
    fn textual_order_is_preserved() {
        let (_, redirs) = parse("cmd > a 2> b > c").unwrap();
        let targets: Vec<&str> = redirs.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_target_is_a_syntax_error() {
        assert!(matches!(parse("cmd >"), Err(ShellError::Syntax(_))));
        assert!(matches!(parse("cmd > | x"), Err(ShellError::Syntax(_))));
    }

    #[test]
    fn quoted_operator_is_an_argument() {
        let (argv, redirs) = parse("echo '>' out").unwrap();
        assert_eq!(argv, vec!["echo", ">", "out"]);
        assert!(redirs.is_empty());
    }
}
