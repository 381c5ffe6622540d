//! End-to-end tests. Library-level tests drive whole lines through the
//! dispatcher and observe statuses, session state, and files written by
//! child processes; builtin stdout behavior is exercised by spawning the
//! shell binary itself with piped input (the test harness captures this
//! process's own stdout, so in-process builtin output is not observable
//! through redirection here).

use myshell::repl::run_line;
use myshell::session::SessionState;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "myshell_it_{}_{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        TestDir { path }
    }

    fn file(&self, name: &str) -> String {
        self.path.join(name).display().to_string()
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run(session: &mut SessionState, line: &str) -> i32 {
    run_line(line, session);
    session.last_status
}

/// Feed `input` to a fresh shell process; returns (stdout, stderr, code).
fn run_shell(input: &str, envs: &[(&str, &str)]) -> (String, String, i32) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_myshell"));
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (name, value) in envs {
        cmd.env(name, value);
    }
    let mut child = cmd.spawn().expect("spawn myshell");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.code().unwrap_or(-1),
    )
}

// ── dispatcher-level behavior ──

#[test]
fn external_output_redirects_to_a_file() {
    let dir = TestDir::new("extout");
    let out = dir.file("out");
    let mut session = SessionState::new();
    assert_eq!(
        run(&mut session, &format!("printf 'hello world\\n' > {}", out)),
        0
    );
    assert_eq!(fs::read_to_string(&out).unwrap(), "hello world\n");
}

#[test]
fn stderr_redirection_captures_diagnostics() {
    let dir = TestDir::new("stderr");
    let missing = dir.file("x.txt");
    let err_log = dir.file("err.log");
    let mut session = SessionState::new();
    let status = run(&mut session, &format!("cat {} 2> {}", missing, err_log));
    assert_ne!(status, 0);
    let logged = fs::read_to_string(&err_log).unwrap();
    assert!(logged.contains("x.txt"), "diagnostic was: {}", logged);
}

#[test]
fn stderr_redirection_creates_file_without_output() {
    let dir = TestDir::new("stderr_touch");
    let err_log = dir.file("err.log");
    let mut session = SessionState::new();
    assert_eq!(run(&mut session, &format!("true 2> {}", err_log)), 0);
    assert_eq!(fs::read_to_string(&err_log).unwrap(), "");
}

#[test]
fn and_then_skips_after_failure_and_sequence_resumes() {
    let dir = TestDir::new("chains");
    let skipped = dir.file("skipped");
    let reached = dir.file("reached");
    let mut session = SessionState::new();
    let status = run(
        &mut session,
        &format!("false && touch {} ; touch {}", skipped, reached),
    );
    assert_eq!(status, 0);
    assert!(!PathBuf::from(&skipped).exists());
    assert!(PathBuf::from(&reached).exists());
}

#[test]
fn or_else_runs_only_after_failure() {
    let dir = TestDir::new("orelse");
    let rescued = dir.file("rescued");
    let quiet = dir.file("quiet");
    let mut session = SessionState::new();
    assert_eq!(run(&mut session, &format!("false || touch {}", rescued)), 0);
    assert!(PathBuf::from(&rescued).exists());

    assert_eq!(run(&mut session, &format!("true || touch {}", quiet)), 0);
    assert!(!PathBuf::from(&quiet).exists());
}

#[test]
fn assignment_then_expansion() {
    let dir = TestDir::new("assign");
    let out = dir.file("out");
    let mut session = SessionState::new();
    assert_eq!(
        run(&mut session, &format!("X=hi ; printf '%s\\n' $X > {}", out)),
        0
    );
    assert_eq!(fs::read_to_string(&out).unwrap(), "hi\n");
}

#[test]
fn pipeline_into_redirected_count() {
    let dir = TestDir::new("pipeline");
    let count = dir.file("count.txt");
    let mut session = SessionState::new();
    let status = run(
        &mut session,
        &format!("printf 'a\\nb\\nc\\n' | wc -l > {}", count),
    );
    assert_eq!(status, 0);
    assert_eq!(fs::read_to_string(&count).unwrap().trim(), "3");
}

#[test]
fn pipeline_status_is_last_stage() {
    let mut session = SessionState::new();
    assert_eq!(run(&mut session, "false | true"), 0);
    assert_eq!(run(&mut session, "true | false"), 1);
}

#[test]
fn pipelined_builtin_cannot_mutate_the_session() {
    let mut session = SessionState::new();
    run(&mut session, "exit 3 | cat");
    assert_eq!(session.pending_exit, None);
}

#[test]
fn command_not_found_is_127() {
    let mut session = SessionState::new();
    assert_eq!(
        run(&mut session, "myshell-definitely-not-a-command-xyz"),
        127
    );
}

#[test]
fn status_variable_reports_previous_failure() {
    let dir = TestDir::new("status");
    let out = dir.file("out");
    let mut session = SessionState::new();
    run(&mut session, &format!("false ; printf '%s\\n' $? > {}", out));
    assert_eq!(fs::read_to_string(&out).unwrap(), "1\n");
}

#[test]
fn signal_death_maps_to_128_plus_signo() {
    let mut session = SessionState::new();
    let status = run(&mut session, "sh -c 'kill -TERM $$'");
    assert_eq!(status, 143);
}

#[test]
fn append_mode_accumulates() {
    let dir = TestDir::new("append");
    let out = dir.file("out");
    let mut session = SessionState::new();
    run(&mut session, &format!("printf 'one\\n' > {}", out));
    run(&mut session, &format!("printf 'two\\n' >> {}", out));
    assert_eq!(fs::read_to_string(&out).unwrap(), "one\ntwo\n");
}

#[test]
fn last_redirection_wins_but_all_targets_are_created() {
    let dir = TestDir::new("lastwins");
    let a = dir.file("a");
    let b = dir.file("b");
    let mut session = SessionState::new();
    assert_eq!(
        run(&mut session, &format!("printf 'hi\\n' > {} > {}", a, b)),
        0
    );
    assert_eq!(fs::read_to_string(&a).unwrap(), "");
    assert_eq!(fs::read_to_string(&b).unwrap(), "hi\n");
}

#[test]
fn quoted_empty_argument_survives() {
    let dir = TestDir::new("emptyarg");
    let out = dir.file("out");
    let mut session = SessionState::new();
    // sh -c 'echo $#' counts the arguments after the command name.
    assert_eq!(
        run(&mut session, &format!("sh -c 'echo $#' dummy '' > {}", out)),
        0
    );
    assert_eq!(fs::read_to_string(&out).unwrap(), "1\n");
}

#[test]
fn unquoted_empty_expansion_is_dropped() {
    let dir = TestDir::new("emptydrop");
    let out = dir.file("out");
    let mut session = SessionState::new();
    assert_eq!(
        run(
            &mut session,
            &format!("sh -c 'echo $#' dummy $MYSHELL_IT_UNSET_VAR > {}", out)
        ),
        0
    );
    assert_eq!(fs::read_to_string(&out).unwrap(), "0\n");
}

#[test]
fn export_makes_variable_visible_to_children() {
    let dir = TestDir::new("export");
    let out = dir.file("out");
    let gone = dir.file("gone");
    let mut session = SessionState::new();
    run(&mut session, "export MYSHELL_IT_EXPORTED=42");
    run(
        &mut session,
        &format!("sh -c 'echo $MYSHELL_IT_EXPORTED' > {}", out),
    );
    assert_eq!(fs::read_to_string(&out).unwrap(), "42\n");

    run(&mut session, "unset MYSHELL_IT_EXPORTED");
    run(
        &mut session,
        &format!("sh -c 'echo x$MYSHELL_IT_EXPORTED' > {}", gone),
    );
    assert_eq!(fs::read_to_string(&gone).unwrap(), "x\n");
}

#[test]
fn glob_expansion_feeds_argv() {
    let dir = TestDir::new("glob");
    fs::write(dir.path.join("b.txt"), "").unwrap();
    fs::write(dir.path.join("a.txt"), "").unwrap();
    let out = dir.file("out");
    let mut session = SessionState::new();
    assert_eq!(
        run(
            &mut session,
            &format!("printf '%s\\n' {}/*.txt > {}", dir.path.display(), out)
        ),
        0
    );
    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("a.txt"));
    assert!(lines[1].ends_with("b.txt"));
}

#[test]
fn exit_breaks_the_statement_list() {
    let dir = TestDir::new("exit");
    let after = dir.file("after");
    let mut session = SessionState::new();
    run(&mut session, &format!("exit 7 ; touch {}", after));
    assert_eq!(session.pending_exit, Some(7));
    assert_eq!(session.last_status, 7);
    assert!(!PathBuf::from(&after).exists());
}

#[test]
fn exit_rejects_non_numeric_argument() {
    let mut session = SessionState::new();
    assert_eq!(run(&mut session, "exit abc"), 1);
    assert_eq!(session.pending_exit, None);
}

#[test]
fn cd_failures_are_status_one() {
    let mut session = SessionState::new();
    assert_eq!(run(&mut session, "cd"), 1);
    assert_eq!(run(&mut session, "cd /myshell-no-such-dir-xyz"), 1);
}

#[test]
fn cd_tilde_with_unusable_home_is_a_diagnosed_failure() {
    let mut session = SessionState::new();
    // Shell variables shadow the environment, so pointing HOME at nothing
    // makes ~ unresolvable for this session only.
    session.set_var("HOME", "");
    assert_eq!(run(&mut session, "cd ~"), 1);
}

#[test]
fn history_rejects_non_numeric_limit() {
    let mut session = SessionState::new();
    assert_eq!(run(&mut session, "history lots"), 1);
}

#[test]
fn history_write_and_append_advance_the_cursor() {
    let dir = TestDir::new("histcursor");
    let file = dir.file("histfile");
    let mut session = SessionState::new();
    session.history = vec!["one".to_string(), "two".to_string()];

    assert_eq!(run(&mut session, &format!("history -w {}", file)), 0);
    assert_eq!(session.history_cursor, 2);
    assert_eq!(fs::read_to_string(&file).unwrap(), "one\ntwo\n");

    session.history.push("three".to_string());
    session.history.push("four".to_string());
    assert_eq!(run(&mut session, &format!("history -a {}", file)), 0);
    assert_eq!(session.history_cursor, 4);
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "one\ntwo\nthree\nfour\n"
    );

    // Nothing new: -a appends nothing.
    assert_eq!(run(&mut session, &format!("history -a {}", file)), 0);
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "one\ntwo\nthree\nfour\n"
    );
}

#[test]
fn history_read_appends_to_memory() {
    let dir = TestDir::new("histread");
    let file = dir.file("histfile");
    fs::write(&file, "from-file-1\n\nfrom-file-2\n").unwrap();
    let mut session = SessionState::new();
    session.history = vec!["existing".to_string()];
    assert_eq!(run(&mut session, &format!("history -r {}", file)), 0);
    assert_eq!(
        session.history,
        vec![
            "existing".to_string(),
            "from-file-1".to_string(),
            "from-file-2".to_string()
        ]
    );
    // -r does not move the append cursor.
    assert_eq!(session.history_cursor, 0);
}

#[test]
fn jump_to_unknown_bookmark_fails() {
    let mut session = SessionState::new();
    assert_eq!(run(&mut session, "jump nowhere"), 1);
}

#[test]
fn type_status_reflects_lookups() {
    let mut session = SessionState::new();
    assert_eq!(run(&mut session, "type echo sh"), 0);
    assert_eq!(run(&mut session, "type myshell-nope-xyz"), 1);
}

#[test]
fn blank_statements_do_nothing() {
    let mut session = SessionState::new();
    run(&mut session, "   ;  ; ");
    assert_eq!(session.last_status, 0);
}

// ── whole-process behavior (builtin stdout, session loop, persistence) ──

#[test]
fn echo_prints_arguments_joined_by_spaces() {
    let (stdout, _, code) = run_shell("echo hello world\n", &[]);
    assert!(stdout.contains("hello world\n"), "stdout: {:?}", stdout);
    assert_eq!(code, 0);
}

#[test]
fn echo_respects_quoting() {
    let (stdout, _, _) = run_shell("echo 'a   b' \"c d\"\n", &[]);
    assert!(stdout.contains("a   b c d\n"), "stdout: {:?}", stdout);
}

#[test]
fn builtin_output_flows_through_a_pipeline() {
    let (stdout, _, code) = run_shell("echo pipe-me | cat\n", &[]);
    assert!(stdout.contains("pipe-me\n"), "stdout: {:?}", stdout);
    assert_eq!(code, 0);
}

#[test]
fn exit_code_is_propagated() {
    let (_, _, code) = run_shell("exit 7\n", &[]);
    assert_eq!(code, 7);
}

#[test]
fn not_found_message_goes_to_stdout_and_status_survives_to_exit() {
    let (stdout, _, code) = run_shell("myshell-nope-xyz\n", &[]);
    assert!(
        stdout.contains("myshell-nope-xyz: command not found"),
        "stdout: {:?}",
        stdout
    );
    assert_eq!(code, 127);
}

#[test]
fn comments_are_skipped_but_recorded() {
    let (stdout, _, _) = run_shell("# just a note\nhistory\n", &[]);
    assert!(stdout.contains("just a note"), "stdout: {:?}", stdout);
}

#[test]
fn history_numbering_and_limits() {
    let (stdout, _, _) = run_shell("echo one\necho two\nhistory 2\n", &[]);
    assert!(!stdout.contains("1  echo one"), "stdout: {:?}", stdout);
    assert!(stdout.contains("2  echo two"), "stdout: {:?}", stdout);
    assert!(stdout.contains("3  history 2"), "stdout: {:?}", stdout);

    let (stdout, _, _) = run_shell("echo one\nhistory 0\n", &[]);
    assert!(!stdout.contains("1  echo one"), "stdout: {:?}", stdout);
}

#[test]
fn histfile_round_trips_across_sessions() {
    let dir = TestDir::new("histfile");
    let histfile = dir.file("history");
    fs::write(&histfile, "printf 'seeded\\n'\n").unwrap();

    let (stdout, _, _) = run_shell("history\n", &[("HISTFILE", &histfile)]);
    assert!(stdout.contains("printf 'seeded\\n'"), "stdout: {:?}", stdout);

    // The session's own commands are written back at shutdown.
    let saved = fs::read_to_string(&histfile).unwrap();
    assert!(saved.contains("history"), "saved: {:?}", saved);
}

#[test]
fn type_reports_builtins_and_path_commands() {
    let (stdout, _, _) = run_shell("type echo sh myshell-nope-xyz\n", &[]);
    assert!(stdout.contains("echo is a shell builtin"));
    assert!(stdout.contains("sh is /"));
    assert!(stdout.contains("myshell-nope-xyz: not found"));
}

#[test]
fn cd_and_pwd_cooperate() {
    let dir = TestDir::new("cdpwd");
    let input = format!("cd {}\npwd\n", dir.path.display());
    let (stdout, _, code) = run_shell(&input, &[]);
    assert!(
        stdout.contains(&dir.path.display().to_string()),
        "stdout: {:?}",
        stdout
    );
    assert_eq!(code, 0);
}

#[test]
fn bookmarks_persist_under_home() {
    let dir = TestDir::new("bookhome");
    let input = format!("cd {}\nbookmark scratch\nbookmark\n", dir.path.display());
    let (stdout, _, _) = run_shell(&input, &[("HOME", &dir.file(""))]);
    assert!(stdout.contains("scratch="), "stdout: {:?}", stdout);
    let saved = fs::read_to_string(dir.path.join(".myshell_bookmarks")).unwrap();
    assert!(saved.starts_with("scratch="), "saved: {:?}", saved);
}

#[test]
fn unterminated_quote_diagnoses_and_continues() {
    let (stdout, stderr, code) = run_shell("echo 'oops\necho recovered\n", &[]);
    assert!(stderr.contains("unterminated quote"), "stderr: {:?}", stderr);
    assert!(stdout.contains("recovered"), "stdout: {:?}", stdout);
    assert_eq!(code, 0);
}
