use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use command_shell::{CommandRegistry, LoopExit, run_loop};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::ShellConfig;

#[derive(Debug, Parser)]
#[command(name = "cmdsh", version)]
#[command(about = "Interactive command shell with built-in help, exit and clear")]
struct Cli {
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run this command line instead of reading stdin (repeatable).
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    commands: Vec<String>,
    /// Write the effective configuration to this file and exit.
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,
    /// Enable debug logging on stderr.
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("command_shell=debug,command_shell_core=debug,cmdsh=debug,warn")
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => ShellConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ShellConfig::default(),
    };

    if let Some(path) = &cli.save_config {
        return config
            .save(path)
            .map_err(|err| format!("Failed to save config '{}': {err}", path.display()));
    }

    let registry = build_registry(&config);
    if cli.commands.is_empty() {
        run_interactive(&registry, &config)
    } else {
        run_commands(&registry, &cli.commands)
    }
}

fn build_registry(config: &ShellConfig) -> CommandRegistry {
    let registry = CommandRegistry::with_builtins();
    let builtins = registry.names();
    for name in &config.disabled_builtins {
        if !builtins.contains(name) {
            warn!(command = %name, "cannot disable unknown built-in command");
        }
    }
    for name in builtins.iter().filter(|name| config.is_disabled(name)) {
        registry.unregister(name);
        debug!(command = %name, "built-in command disabled");
    }
    registry
}

/// Runs each `-c` line in order, stopping early on `exit`.
fn run_commands(registry: &CommandRegistry, lines: &[String]) -> Result<(), String> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    for line in lines {
        match registry.dispatch_line(line, &mut out) {
            Ok(flow) if flow.is_terminate() => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("{err}");
                failures += 1;
            }
        }
    }
    out.flush()
        .map_err(|err| format!("Failed to flush stdout: {err}"))?;

    if failures > 0 {
        return Err(format!("{failures} command(s) failed"));
    }
    Ok(())
}

fn run_interactive(registry: &CommandRegistry, config: &ShellConfig) -> Result<(), String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();

    if let Some(banner) = &config.banner {
        writeln!(out, "{banner}").map_err(|e| format!("Failed to write banner: {e}"))?;
    }

    let exit = run_loop(registry, stdin.lock(), &mut out, &mut err, &config.prompt)
        .map_err(|e| format!("Session I/O failed: {e}"))?;
    if exit == LoopExit::EndOfInput {
        // Leave the terminal on a fresh line after the last prompt.
        writeln!(out).map_err(|e| format!("Failed to write to stdout: {e}"))?;
    }
    Ok(())
}
