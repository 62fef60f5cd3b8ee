//! Interpretation of raw printer status replies.

use tracing::debug;

use crate::device::CommandChannel;
use crate::error::AgentError;
use crate::types::{ConnectionReport, StatusReport};

/// Host status query understood by supported label printers.
pub const STATUS_QUERY: &str = "~HQES";

/// Map a single numeric status token to its human-readable label.
fn error_label(code: &str) -> Option<&'static str> {
    match code {
        "1" => Some("Paper Out"),
        "2" => Some("Printhead Issue"),
        "3" => Some("Printer Paused"),
        "4" => Some("Low Ink/Toner"),
        "5" => Some("Paper Jam"),
        "6" => Some("General Error"),
        _ => None,
    }
}

/// Queries the selected printer and decodes its raw replies into typed
/// reports.
///
/// Both checks return a report unconditionally; internal failures are mapped
/// into the report instead of propagated.
pub struct StatusInterpreter {
    channel: CommandChannel,
}

impl StatusInterpreter {
    pub fn new(channel: CommandChannel) -> Self {
        Self { channel }
    }

    /// Query the selected printer and decode its readiness.
    pub async fn check_status(&self) -> StatusReport {
        let reply = match self.query().await {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "status exchange failed");
                return general_error_report();
            }
        };

        parse_status_reply(&reply)
    }

    /// Check whether the selected printer is reachable and responding.
    ///
    /// With no device selected this reports disconnected without touching
    /// the network.
    pub async fn check_connection(&self) -> ConnectionReport {
        if !self.channel.store().current().is_selected() {
            return ConnectionReport {
                is_connected: false,
                message: "No printer connected.".to_string(),
            };
        }

        match self.query().await {
            Ok(reply) if reply.is_empty() || reply.contains("ERROR") => ConnectionReport {
                is_connected: false,
                message: "Printer is not responding".to_string(),
            },
            Ok(_) => ConnectionReport {
                is_connected: true,
                message: "Printer is connected".to_string(),
            },
            Err(e) => ConnectionReport {
                is_connected: false,
                message: format!("Connection error: {}", e),
            },
        }
    }

    async fn query(&self) -> Result<String, AgentError> {
        self.channel.write(STATUS_QUERY).await?;
        self.channel.read().await
    }
}

fn general_error_report() -> StatusReport {
    StatusReport {
        is_ready_to_print: false,
        errors: vec!["General Error".to_string()],
    }
}

/// Decode a raw status reply into a report.
///
/// An empty reply, a reply containing "ERROR" (case-sensitive), or one
/// containing "no printer" (case-insensitive) short-circuits to a general
/// error. Otherwise everything but digits and whitespace is stripped and the
/// remaining single-space-separated tokens are looked up in the code table;
/// unrecognized tokens are skipped.
pub fn parse_status_reply(reply: &str) -> StatusReport {
    if reply.is_empty()
        || reply.contains("ERROR")
        || reply.to_lowercase().contains("no printer")
    {
        return general_error_report();
    }

    let codes: String = reply
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_whitespace())
        .collect();

    let errors: Vec<String> = codes
        .trim()
        .split(' ')
        .filter_map(error_label)
        .map(String::from)
        .collect();

    StatusReport {
        is_ready_to_print: errors.is_empty(),
        errors,
    }
}
