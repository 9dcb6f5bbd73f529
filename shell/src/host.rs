//! Read-dispatch loop for interactive hosts.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::DispatchError;
use crate::registry::CommandRegistry;
use crate::session::Flow;

/// Why [`run_loop`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// A command returned [`Flow::Terminate`].
    Terminated,
    /// The input ran out.
    EndOfInput,
}

/// Reads lines from `input` and dispatches each on `registry`.
///
/// `prompt` is written to `out` before every line. Dispatch errors are
/// reported on `err` and the loop keeps reading; help output needs no
/// further action. Bytes that are not valid UTF-8 are replaced with
/// `U+FFFD` rather than ending the session.
///
/// # Errors
///
/// Returns an error if reading `input` or writing to `out` or `err` fails.
///
/// # Examples
///
/// ```
/// use command_shell::{CommandRegistry, LoopExit, run_loop};
///
/// let registry = CommandRegistry::with_builtins();
/// let input = "bogus\nexit\nhelp -c\n".as_bytes();
/// let (mut out, mut err) = (Vec::new(), Vec::new());
///
/// let exit = run_loop(&registry, input, &mut out, &mut err, "> ").unwrap();
/// assert_eq!(exit, LoopExit::Terminated);
/// assert!(String::from_utf8(err).unwrap().contains("bogus"));
/// assert_eq!(out, b"> > ");
/// ```
pub fn run_loop<R: BufRead>(
    registry: &CommandRegistry,
    mut input: R,
    out: &mut dyn Write,
    err: &mut dyn Write,
    prompt: &str,
) -> io::Result<LoopExit> {
    let mut buf = Vec::new();
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(LoopExit::EndOfInput);
        }
        // A line with invalid UTF-8 fails on its own, not the session.
        let line = String::from_utf8_lossy(&buf);
        match registry.dispatch_line(&line, out) {
            Ok(Flow::Terminate) => {
                debug!("session terminated by command");
                return Ok(LoopExit::Terminated);
            }
            Ok(Flow::Continue | Flow::HelpShown) => {}
            Err(DispatchError::Io(e)) => return Err(e),
            Err(e) => writeln!(err, "{e}")?,
        }
    }
}
