//! Wire types shared with the print agent.
//!
//! Serialized field names use camelCase to stay compatible with the agent's
//! JSON protocol.

use serde::{Deserialize, Serialize};

/// Descriptor of a printer known to the agent.
///
/// The default value is the "empty" device: the valid initial state before
/// any selection has been made. Commands can only be routed once `name` is
/// non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    /// Printer name shown by the agent
    pub name: String,
    /// Printer class reported by the agent (e.g. "printer")
    pub device_type: String,
    /// Connection kind (e.g. "usb", "network")
    pub connection: String,
    /// Unique identifier the agent uses to route commands
    pub uid: String,
    /// Driver/provider identifier
    pub provider: String,
    /// Hardware manufacturer
    pub manufacturer: String,
    /// Reserved; always 0
    pub version: u32,
}

impl Device {
    /// Whether this descriptor can route commands, i.e. a selection was made.
    pub fn is_selected(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Result of a status query against the selected printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// True iff no error code was recognized in the reply
    pub is_ready_to_print: bool,
    /// Human-readable error labels in reply order, duplicates preserved
    pub errors: Vec<String>,
}

/// Result of a connection check against the selected printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
    pub is_connected: bool,
    pub message: String,
}
