//! Built-in commands.

use crate::registry::CommandDescriptor;

pub mod echo;
pub mod new;

/// Every built-in command, in the order it appears in `--help`.
pub fn builtin() -> [CommandDescriptor; 2] {
    [echo::descriptor(), new::descriptor()]
}
