//! Raw write/read exchange with the selected printer.

use std::sync::Arc;

use serde::Serialize;

use crate::agent::{AgentClient, RequestConfig};
use crate::error::AgentError;
use crate::protocol::label_template;
use crate::storage::DeviceStore;
use crate::types::Device;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteRequest<'a> {
    device: &'a Device,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadRequest<'a> {
    device: &'a Device,
}

/// Low-level command exchange for the currently selected device.
///
/// Cheap to clone; clones share the agent client and device store.
#[derive(Clone)]
pub struct CommandChannel {
    client: AgentClient,
    store: Arc<DeviceStore>,
}

impl CommandChannel {
    pub fn new(client: AgentClient, store: Arc<DeviceStore>) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &DeviceStore {
        &self.store
    }

    /// Send a raw payload to the selected printer; the reply body is
    /// discarded.
    pub async fn write(&self, payload: &str) -> Result<(), AgentError> {
        let body = write_body(&self.store.current(), payload)?;
        self.client
            .request("write", RequestConfig::post_json(body))
            .await?;
        Ok(())
    }

    /// Read pending output from the selected printer.
    pub async fn read(&self) -> Result<String, AgentError> {
        let body = read_body(&self.store.current())?;
        let response = self
            .client
            .request("read", RequestConfig::post_json(body))
            .await?;

        response.body.ok_or(AgentError::EmptyResponse)
    }

    /// Print raw text exactly as supplied.
    pub async fn print(&self, text: &str) -> Result<(), AgentError> {
        self.write(text).await
    }

    /// Print `label_data` wrapped in the fixed label template.
    pub async fn print_label(&self, label_data: &str) -> Result<(), AgentError> {
        self.write(&label_template(label_data)).await
    }
}

fn write_body(device: &Device, data: &str) -> Result<String, AgentError> {
    serde_json::to_string(&WriteRequest { device, data })
        .map_err(|e| AgentError::TransportExhausted(e.to_string()))
}

fn read_body(device: &Device) -> Result<String, AgentError> {
    serde_json::to_string(&ReadRequest { device })
        .map_err(|e| AgentError::TransportExhausted(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_body_carries_device_and_data() {
        let device = Device {
            name: "ZD410".to_string(),
            device_type: "printer".to_string(),
            ..Default::default()
        };

        let body = write_body(&device, "~HQES").unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["device"]["name"], "ZD410");
        assert_eq!(value["device"]["deviceType"], "printer");
        assert_eq!(value["data"], "~HQES");
    }

    #[test]
    fn read_body_carries_only_device() {
        let device = Device {
            name: "ZD410".to_string(),
            ..Default::default()
        };

        let body = read_body(&device).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["device"]["name"], "ZD410");
        assert!(value.get("data").is_none());
    }
}
