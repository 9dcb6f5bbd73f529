//! Built-in `help`, `exit`/`quit` and `clear` commands.

use command_shell_core::OptionSpec;

use crate::command::Command;
use crate::registry::CommandRegistry;
use crate::session::Flow;

/// Name of the built-in help command.
pub const HELP: &str = "help";
/// Name of the built-in exit command.
pub const EXIT: &str = "exit";
/// Alias of [`EXIT`].
pub const QUIT: &str = "quit";
/// Name of the built-in clear command.
pub const CLEAR: &str = "clear";

/// Erases the terminal and moves the cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// `help`: prints its own options, or with `-c/--cmd` lists every command
/// of the dispatching registry.
pub fn help_command() -> Command {
    Command::new("打印帮助信息")
        .with_option(OptionSpec::flag(Some('c'), "cmd").with_description("列出所有命令"))
        .on_complete(|args, session| {
            if args.contains_key("cmd") {
                session.registry.write_help(&mut *session.out)?;
            }
            Ok(Flow::Continue)
        })
}

/// `exit`/`quit`: ends the session.
pub fn exit_command() -> Command {
    Command::new("退出shell").on_complete(|_, _| Ok(Flow::Terminate))
}

/// `clear`: clears the terminal.
pub fn clear_command() -> Command {
    Command::new("清空屏幕输出").on_complete(|_, session| {
        session.out.write_all(CLEAR_SCREEN.as_bytes())?;
        session.out.flush()?;
        Ok(Flow::Continue)
    })
}

/// Registers every built-in command on `registry`.
pub fn register_builtins(registry: &CommandRegistry) {
    registry.register(HELP, help_command());
    registry.register(EXIT, exit_command());
    registry.register(QUIT, exit_command());
    registry.register(CLEAR, clear_command());
}
