use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use command_shell::{
    Command, CommandRegistry, DispatchError, Flow, LoopExit, builtins, run_loop, tokenize,
};
use command_shell_core::{OptionSpec, ParseError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn counting_command(counter: &Arc<AtomicUsize>) -> Command {
    let counter = Arc::clone(counter);
    Command::new("count invocations")
        .with_option(OptionSpec::required(Some('n'), "times").with_default("1"))
        .on_complete(move |args, _| {
            let times: usize = args
                .get("times")
                .unwrap_or_default()
                .parse()
                .map_err(|_| DispatchError::Failed("times must be a number".into()))?;
            counter.fetch_add(times, Ordering::SeqCst);
            Ok(Flow::Continue)
        })
}

fn run_script(registry: &CommandRegistry, script: impl AsRef<[u8]>) -> (LoopExit, String, String) {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let exit = run_loop(registry, script.as_ref(), &mut out, &mut err, "").unwrap();
    (
        exit,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_exit_line_terminates() {
    let registry = CommandRegistry::with_builtins();
    let flow = registry.dispatch_line("exit", &mut Vec::new()).unwrap();
    assert_eq!(flow, Flow::Terminate);
}

#[test]
fn test_unknown_command() {
    let registry = CommandRegistry::with_builtins();
    let err = registry
        .dispatch_line("bogus", &mut Vec::new())
        .unwrap_err();
    assert!(matches!(err, DispatchError::UnknownCommand(ref name) if name == "bogus"));

    let empty = CommandRegistry::new();
    let err = empty.dispatch("bogus", &["-x"], &mut Vec::new()).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownCommand(_)));
}

#[test]
fn test_tokenizer_scenarios() {
    assert_eq!(tokenize("a   b\tc"), ["a", "b", "c"]);
    assert!(tokenize("").is_empty());

    let registry = CommandRegistry::new();
    let mut out = Vec::new();
    assert_eq!(registry.dispatch_line("", &mut out).unwrap(), Flow::Continue);
    assert!(out.is_empty());
}

#[test]
fn test_direct_and_line_dispatch_agree() {
    let counter = Arc::new(AtomicUsize::new(0));
    let registry = CommandRegistry::new();
    registry.register("count", counting_command(&counter));

    registry
        .dispatch("count", &["--times", "3"], &mut Vec::new())
        .unwrap();
    registry
        .dispatch_line("count --times 3", &mut Vec::new())
        .unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 6);
}

#[test]
fn test_parse_errors_surface_through_dispatch() {
    let registry = CommandRegistry::new();
    registry.register(
        "connect",
        Command::new("open a connection")
            .with_option(OptionSpec::required(None, "host").mandatory()),
    );

    let err = registry
        .dispatch_line("connect", &mut Vec::new())
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Parse(ParseError::MissingRequired(ref name)) if name == "host"
    ));

    let err = registry
        .dispatch_line("connect --hots x", &mut Vec::new())
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Parse(ParseError::UnrecognizedOption(_))
    ));
}

#[test]
fn test_registered_command_queries_after_dispatch() {
    let registry = CommandRegistry::new();
    registry.register(
        "path",
        Command::new("show search path")
            .with_option(OptionSpec::required(Some('d'), "dirs").with_default("")),
    );

    registry
        .dispatch_line("path -d /bin:/sbin", &mut Vec::new())
        .unwrap();
    let command = registry.resolve("path").unwrap();
    assert_eq!(command.split_value("dirs", ":"), ["/bin", "/sbin"]);

    registry.dispatch_line("path -d", &mut Vec::new()).unwrap_err();
    assert!(!command.has_key("dirs"));

    registry.dispatch_line("path --dirs=", &mut Vec::new()).unwrap();
    assert_eq!(command.split_value("dirs", ":"), [""]);
}

#[test]
fn test_registry_shared_across_threads() {
    let counter = Arc::new(AtomicUsize::new(0));
    let registry = Arc::new(CommandRegistry::with_builtins());
    registry.register("count", counting_command(&counter));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..25 {
                    registry.dispatch_line("count", &mut Vec::new()).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(counter.load(Ordering::SeqCst), 100);
}

#[test]
fn test_commands_can_register_commands() {
    let registry = CommandRegistry::with_builtins();
    registry.register(
        "alias",
        Command::new("register an exit alias")
            .with_option(OptionSpec::required(Some('n'), "name").mandatory())
            .on_complete(|args, session| {
                let name = args.get("name").unwrap_or_default();
                session.registry.register(name, builtins::exit_command());
                Ok(Flow::Continue)
            }),
    );

    registry.dispatch_line("alias -n bye", &mut Vec::new()).unwrap();
    assert!(registry.dispatch_line("bye", &mut Vec::new()).unwrap().is_terminate());
}

// ---------------------------------------------------------------------------
// Host loop
// ---------------------------------------------------------------------------

#[test]
fn test_loop_reports_errors_and_continues() {
    let registry = CommandRegistry::with_builtins();
    let (exit, out, err) = run_script(&registry, "bogus\nhelp --nope\nhelp -c\nexit\nhelp\n");

    assert_eq!(exit, LoopExit::Terminated);
    assert_eq!(err.lines().count(), 2);
    assert!(err.contains("bogus"));
    assert!(err.contains("--nope"));
    assert!(out.contains("退出shell"));
    assert!(!out.contains("打印此信息"));
}

#[test]
fn test_loop_ends_at_end_of_input() {
    let registry = CommandRegistry::with_builtins();
    let (exit, out, err) = run_script(&registry, "\n   \nhelp\n");
    assert_eq!(exit, LoopExit::EndOfInput);
    assert!(out.contains("打印此信息"));
    assert!(err.is_empty());
}

#[test]
fn test_loop_survives_invalid_utf8_line() {
    let registry = CommandRegistry::with_builtins();
    let (exit, out, err) = run_script(&registry, b"\xff\xfe bogus\nhelp -c\nexit\n");

    assert_eq!(exit, LoopExit::Terminated);
    assert_eq!(err.lines().count(), 1);
    assert!(err.contains('\u{FFFD}'));
    assert!(out.contains("退出shell"));
}

#[test]
fn test_loop_handles_last_line_without_newline() {
    let registry = CommandRegistry::with_builtins();
    let (exit, _, err) = run_script(&registry, "help -c\r\nexit");
    assert_eq!(exit, LoopExit::Terminated);
    assert!(err.is_empty());
}
