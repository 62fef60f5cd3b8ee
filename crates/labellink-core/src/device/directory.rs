//! Printer discovery through the agent.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::agent::{AgentClient, RequestConfig};
use crate::error::AgentError;
use crate::storage::DeviceStore;
use crate::types::Device;

/// Minimum line count of a valid `default` reply. Only the first six lines
/// carry fields; the seventh is the completeness signal.
const DEFAULT_REPLY_MIN_LINES: usize = 7;

/// Queries the agent for available printers and the system default printer.
pub struct PrinterDirectory {
    client: AgentClient,
    store: Arc<DeviceStore>,
}

impl PrinterDirectory {
    pub fn new(client: AgentClient, store: Arc<DeviceStore>) -> Self {
        Self { client, store }
    }

    /// List the printers the agent can see.
    ///
    /// Entries come back as raw JSON without validation against the
    /// [`Device`] schema. Network failures, malformed replies, and an empty
    /// list all collapse into [`AgentError::NoPrintersAvailable`]; callers
    /// cannot tell "no printers" from "agent unreachable".
    pub async fn list_available(&self) -> Result<Vec<Value>, AgentError> {
        let response = self
            .client
            .request("available", RequestConfig::get())
            .await
            .map_err(|e| {
                debug!(error = %e, "available listing failed");
                AgentError::NoPrintersAvailable
            })?;

        let body = response.body.ok_or(AgentError::NoPrintersAvailable)?;
        decode_available(&body)
    }

    /// Look up the agent's default printer and make it the selected device.
    pub async fn get_default(&self) -> Result<Device, AgentError> {
        let response = self
            .client
            .request("default", RequestConfig::get())
            .await
            .map_err(|e| {
                debug!(error = %e, "default lookup failed");
                AgentError::NoDefaultPrinter
            })?;

        let body = response.body.ok_or(AgentError::NoDefaultPrinter)?;
        let device = parse_default_reply(&body)?;

        self.store.select(device.clone())?;

        Ok(device)
    }
}

/// Decode an `available` reply body into its printer entries.
fn decode_available(body: &str) -> Result<Vec<Value>, AgentError> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| AgentError::NoPrintersAvailable)?;

    let printers = value
        .get("printer")
        .and_then(Value::as_array)
        .ok_or(AgentError::NoPrintersAvailable)?;

    if printers.is_empty() {
        return Err(AgentError::NoPrintersAvailable);
    }

    Ok(printers.clone())
}

/// Parse the plain-text `default` reply into a [`Device`].
///
/// The reply is positional: lines 0-5 carry `Label: value` pairs for name,
/// type, connection, uid, provider, and manufacturer. Lines past the
/// seventh are ignored.
fn parse_default_reply(text: &str) -> Result<Device, AgentError> {
    let lines: Vec<&str> = text.split('\n').collect();

    if lines.len() < DEFAULT_REPLY_MIN_LINES {
        return Err(AgentError::InvalidPrinterFormat);
    }

    Ok(Device {
        name: field_value(lines[0])?,
        device_type: field_value(lines[1])?,
        connection: field_value(lines[2])?,
        uid: field_value(lines[3])?,
        provider: field_value(lines[4])?,
        manufacturer: field_value(lines[5])?,
        version: 0,
    })
}

/// Everything after the line's first `:`, trimmed.
fn field_value(line: &str) -> Result<String, AgentError> {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .ok_or(AgentError::NoDefaultPrinter)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_REPLY: &str = "Name: ZD410\n\
                                 Type: printer\n\
                                 Connection: usb\n\
                                 Uid: 29J164800391\n\
                                 Provider: com.zebra.ds.webdriver\n\
                                 Manufacturer: Zebra Technologies\n\
                                 Status: online";

    #[test]
    fn parses_well_formed_default_reply() {
        let device = parse_default_reply(DEFAULT_REPLY).unwrap();

        assert_eq!(device.name, "ZD410");
        assert_eq!(device.device_type, "printer");
        assert_eq!(device.connection, "usb");
        assert_eq!(device.uid, "29J164800391");
        assert_eq!(device.provider, "com.zebra.ds.webdriver");
        assert_eq!(device.manufacturer, "Zebra Technologies");
        assert_eq!(device.version, 0);
    }

    #[test]
    fn six_lines_is_invalid_format() {
        let reply = DEFAULT_REPLY.rsplit_once('\n').unwrap().0;
        assert_eq!(reply.split('\n').count(), 6);

        let err = parse_default_reply(reply).unwrap_err();
        assert!(matches!(err, AgentError::InvalidPrinterFormat));
    }

    #[test]
    fn lines_past_the_seventh_are_ignored() {
        let reply = format!("{}\nExtra: junk\nMore: junk", DEFAULT_REPLY);
        let device = parse_default_reply(&reply).unwrap();
        assert_eq!(device.name, "ZD410");
    }

    #[test]
    fn missing_colon_is_no_default_printer() {
        let reply = "Name ZD410\nType: printer\nConnection: usb\nUid: 1\nProvider: p\nManufacturer: m\nStatus: online";
        let err = parse_default_reply(reply).unwrap_err();
        assert!(matches!(err, AgentError::NoDefaultPrinter));
    }

    #[test]
    fn field_values_are_trimmed_after_first_colon() {
        assert_eq!(field_value("Uid:  a:b:c  ").unwrap(), "a:b:c");
        assert_eq!(field_value("Name:ZD410").unwrap(), "ZD410");
    }

    #[test]
    fn decode_available_returns_entries() {
        let body = r#"{"printer": [{"name": "ZD410"}, {"name": "GX430t"}]}"#;
        let printers = decode_available(body).unwrap();

        assert_eq!(printers.len(), 2);
        assert_eq!(printers[0]["name"], "ZD410");
    }

    #[test]
    fn decode_available_rejects_empty_list() {
        let err = decode_available(r#"{"printer": []}"#).unwrap_err();
        assert_eq!(err.to_string(), "No printers available or network error");
    }

    #[test]
    fn decode_available_rejects_missing_field_and_bad_json() {
        assert!(decode_available(r#"{"devices": []}"#).is_err());
        assert!(decode_available("not json").is_err());
    }
}
