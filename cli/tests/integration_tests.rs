use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn cmdsh() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cmdsh"))
}

/// Runs `cmdsh` with `args`, feeding `input` on stdin.
fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = cmdsh()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn cmdsh");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait on cmdsh")
}

// ---------------------------------------------------------------------------
// One-shot commands
// ---------------------------------------------------------------------------

#[test]
fn command_flag_runs_line() {
    let out = cmdsh().args(["-c", "help -c"]).output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("  exit   退出shell"));
    assert!(stdout.contains("  help   打印帮助信息"));
}

#[test]
fn command_flag_stops_at_exit() {
    let out = cmdsh()
        .args(["-c", "exit", "-c", "help -c"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn command_flag_reports_failures() {
    let out = cmdsh()
        .args(["-c", "bogus", "-c", "help"])
        .output()
        .unwrap();
    assert!(!out.status.success());

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("unknown command 'bogus'"));
    assert!(stderr.contains("1 command(s) failed"));
    // The second line still ran.
    assert!(String::from_utf8(out.stdout).unwrap().contains("打印此信息"));
}

// ---------------------------------------------------------------------------
// Interactive loop
// ---------------------------------------------------------------------------

#[test]
fn interactive_session_ends_on_exit() {
    let out = run_with_stdin(&[], "help --cmd\nbogus\nexit\nhelp\n");
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("> "));
    assert!(stdout.contains("清空屏幕输出"));
    assert!(!stdout.contains("打印此信息"));

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("bogus"));
}

#[test]
fn interactive_session_ends_on_eof() {
    let out = run_with_stdin(&[], "clear\n");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("\x1b[2J\x1b[H"));
    assert!(stdout.ends_with("> \n"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_sets_prompt_banner_and_disables_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cmdsh.yml");
    fs::write(
        &path,
        "prompt: \"sh$ \"\nbanner: welcome\ndisabled_builtins:\n  - clear\n",
    )
    .unwrap();

    let out = run_with_stdin(&["--config", path.to_str().unwrap()], "clear\nquit\n");
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("welcome\nsh$ "));
    assert!(!stdout.contains("\x1b[2J"));

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("unknown command 'clear'"));
}

#[test]
fn missing_config_fails() {
    let out = cmdsh()
        .args(["--config", "/nonexistent/cmdsh.yml", "-c", "help"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(
        String::from_utf8(out.stderr)
            .unwrap()
            .contains("Failed to load config")
    );
}

#[test]
fn save_config_writes_effective_settings() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("in.yml");
    let target = dir.path().join("out.yml");
    fs::write(&source, "banner: hi\n").unwrap();

    let out = cmdsh()
        .args(["--config", source.to_str().unwrap()])
        .args(["--save-config", target.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let saved = fs::read_to_string(&target).unwrap();
    assert!(saved.contains("banner: hi"));
    assert!(saved.contains("prompt:"));
}
