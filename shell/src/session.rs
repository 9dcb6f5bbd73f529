use std::io::Write;

use crate::registry::CommandRegistry;

/// What a host loop should do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading commands.
    Continue,
    /// Help was printed instead of running the command; keep reading.
    HelpShown,
    /// The session should end.
    Terminate,
}

impl Flow {
    /// Returns `true` for [`Flow::Terminate`].
    pub fn is_terminate(self) -> bool {
        self == Flow::Terminate
    }
}

/// Per-dispatch context handed to completion callbacks.
///
/// Gives access to the output sink and to the registry that dispatched the
/// command, so a command can list or invoke other commands.
pub struct Session<'a> {
    /// Output sink for this dispatch.
    pub out: &'a mut dyn Write,
    /// Registry the command was resolved from.
    pub registry: &'a CommandRegistry,
}

impl<'a> Session<'a> {
    /// Creates a session writing to `out`.
    pub fn new(registry: &'a CommandRegistry, out: &'a mut dyn Write) -> Self {
        Self { out, registry }
    }
}
