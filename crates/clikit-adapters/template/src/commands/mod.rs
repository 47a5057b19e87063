use crate::registry::CommandDescriptor;

mod echo;

/// Every command this application ships, in help order.
pub fn all() -> Vec<CommandDescriptor> {
    vec![echo::descriptor()]
}
