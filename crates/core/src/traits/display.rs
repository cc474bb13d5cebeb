//! Display collaborator trait

use crate::ChatMessage;

/// Renders chat turns
///
/// Messages arrive in submission order; the display has no other contract.
pub trait ChatDisplay: Send + Sync {
    fn show(&self, message: &ChatMessage);
}
