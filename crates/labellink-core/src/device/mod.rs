//! Device-facing operations: discovery and raw command exchange.

mod channel;
mod directory;

pub use channel::CommandChannel;
pub use directory::PrinterDirectory;
