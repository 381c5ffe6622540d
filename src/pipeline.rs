use crate::commands::{self, BUILTINS};
use crate::errors::{ShellError, ShellResult};
use crate::lexer::Token;
use crate::redirection::{self, Redirection};
use crate::session::SessionState;
use std::io::{self, Write};
use std::os::unix::io::{AsRawFd, FromRawFd, OwnedFd};
use std::process::{Child, Command, Stdio};

/// One pipeline stage: an argument vector plus its redirections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStage {
    pub argv: Vec<String>,
    pub redirs: Vec<Redirection>,
}

/// Partition an expanded token stream into pipeline stages. A stage with
/// no command word (bare or trailing pipe, or redirections only) is a
/// syntax error.
pub fn compose(tokens: &[Token]) -> ShellResult<Vec<CommandStage>> {
    let mut stages = Vec::new();
    for group in tokens.split(|t| t.is_operator("|")) {
        let (argv, redirs) = redirection::parse_redirections(group)?;
        if argv.is_empty() {
            return Err(ShellError::Syntax("empty pipeline stage".to_string()));
        }
        stages.push(CommandStage { argv, redirs });
    }
    Ok(stages)
}

enum StageHandle {
    /// An external child spawned through std::process.
    Spawned(Child),
    /// A forked child running a builtin.
    Forked(libc::pid_t),
    /// The stage never produced a process; its status is already known.
    Done(i32),
}

/// Execute a pipeline. The exit status is the last stage's. For a single
/// stage no processes beyond the command itself are involved; for N ≥ 2
/// the stages are wired left to right and all children are reaped before
/// returning.
pub fn execute_pipeline(stages: &[CommandStage], session: &mut SessionState) -> i32 {
    if stages.len() == 1 {
        return commands::run_stage(&stages[0], session);
    }

    let mut handles: Vec<StageHandle> = Vec::with_capacity(stages.len());
    let mut prev: Option<OwnedFd> = None;

    for (index, stage) in stages.iter().enumerate() {
        let first = index == 0;
        let last = index + 1 == stages.len();
        let upstream = prev.take();

        let result = if BUILTINS.is_builtin(&stage.argv[0]) {
            fork_builtin_stage(stage, upstream, last, session)
        } else {
            spawn_external_stage(stage, upstream, first, last)
        };
        match result {
            Ok((handle, next)) => {
                handles.push(handle);
                prev = next;
            }
            Err(e) => {
                eprintln!("{}", e);
                handles.push(StageHandle::Done(e.status()));
            }
        }
    }
    // Nothing in the parent may keep a pipe end alive past this point.
    drop(prev);

    let mut status = 0;
    for handle in handles {
        status = match handle {
            StageHandle::Spawned(mut child) => match child.wait() {
                Ok(wait_status) => commands::external::exit_code(wait_status),
                Err(_) => 1,
            },
            StageHandle::Forked(pid) => wait_forked(pid),
            StageHandle::Done(code) => code,
        };
    }
    status
}

/// Spawn one external stage, wiring its stdin to the upstream pipe and its
/// stdout to a fresh pipe unless it is the last stage. Explicit
/// redirections override the pipe ends.
fn spawn_external_stage(
    stage: &CommandStage,
    upstream: Option<OwnedFd>,
    first: bool,
    last: bool,
) -> ShellResult<(StageHandle, Option<OwnedFd>)> {
    let Some(path) = commands::external::find_executable(&stage.argv[0]) else {
        let e = ShellError::CommandNotFound(stage.argv[0].clone());
        // On stdout so the message stays visible across pipes.
        println!("{}", e);
        return Ok((StageHandle::Done(e.status()), None));
    };

    let mut cmd = Command::new(&path);
    cmd.args(&stage.argv[1..]);

    match upstream {
        Some(fd) => {
            cmd.stdin(Stdio::from(fd));
        }
        None if !first => {
            // The upstream stage broke; hand this one an immediate EOF.
            cmd.stdin(Stdio::null());
        }
        None => {}
    }
    if !last {
        cmd.stdout(Stdio::piped());
    }
    redirection::apply_to_command(&mut cmd, &stage.redirs)?;

    let mut child = cmd
        .spawn()
        .map_err(|e| ShellError::Execution(format!("{}: {}", stage.argv[0], e)))?;
    let next = child.stdout.take().map(OwnedFd::from);
    Ok((StageHandle::Spawned(child), next))
}

/// Run a builtin as a pipeline stage by forking. The child wires the pipe
/// ends onto fds 0/1, applies redirections, runs the builtin against a
/// scratch copy of the session, and exits 0, so a pipelined builtin cannot
/// mutate parent shell state.
fn fork_builtin_stage(
    stage: &CommandStage,
    upstream: Option<OwnedFd>,
    last: bool,
    session: &SessionState,
) -> ShellResult<(StageHandle, Option<OwnedFd>)> {
    let (read_end, write_end) = if last {
        (None, None)
    } else {
        let (read_end, write_end) = create_pipe()?;
        (Some(read_end), Some(write_end))
    };

    // Anything buffered before the fork would otherwise be flushed twice.
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();

    let pid = unsafe { libc::fork() };
    if pid < 0 {
        return Err(ShellError::Execution("fork failed".to_string()));
    }
    if pid == 0 {
        run_builtin_child(stage, upstream, write_end, session);
    }

    drop(upstream);
    drop(write_end);
    Ok((StageHandle::Forked(pid), read_end))
}

fn run_builtin_child(
    stage: &CommandStage,
    upstream: Option<OwnedFd>,
    write_end: Option<OwnedFd>,
    session: &SessionState,
) -> ! {
    unsafe {
        if let Some(fd) = &upstream {
            libc::dup2(fd.as_raw_fd(), libc::STDIN_FILENO);
        }
        if let Some(fd) = &write_end {
            libc::dup2(fd.as_raw_fd(), libc::STDOUT_FILENO);
        }
    }
    drop(upstream);
    drop(write_end);

    if !redirection::apply_in_child(&stage.redirs) {
        let _ = io::stderr().flush();
        unsafe { libc::_exit(1) }
    }

    let mut scratch = session.clone();
    if let Some(Err(e)) = BUILTINS.execute(&stage.argv[0], &stage.argv, &mut scratch) {
        eprintln!("{}", e);
    }
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
    unsafe { libc::_exit(0) }
}

fn create_pipe() -> ShellResult<(OwnedFd, OwnedFd)> {
    let mut fds = [0; 2];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } < 0 {
        return Err(ShellError::Execution("pipe failed".to_string()));
    }
    unsafe { Ok((OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1]))) }
}

fn wait_forked(pid: libc::pid_t) -> i32 {
    let mut status: libc::c_int = 0;
    let rc = unsafe { libc::waitpid(pid, &mut status, 0) };
    if rc < 0 {
        return 1;
    }
    if libc::WIFEXITED(status) {
        libc::WEXITSTATUS(status)
    } else if libc::WIFSIGNALED(status) {
        128 + libc::WTERMSIG(status)
    } else {
        1
    }
}
