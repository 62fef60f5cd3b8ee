//! Client library for driving label printers through a local HTTP print
//! agent.
//!
//! The agent exposes four endpoints (`available`, `default`, `write`,
//! `read`). This crate wraps them in a retrying HTTP client
//! ([`AgentClient`]), a persistent selected-device store ([`DeviceStore`]),
//! discovery ([`PrinterDirectory`]), raw command exchange
//! ([`CommandChannel`]), and typed interpretation of the printer's raw
//! status replies ([`StatusInterpreter`]).
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use labellink_core::{
//!     AgentClient, AgentConfig, CommandChannel, DeviceStore, FileStorage,
//!     PrinterDirectory, StatusInterpreter,
//! };
//!
//! # async fn run() -> Result<(), labellink_core::AgentError> {
//! let client = AgentClient::new(AgentConfig::default())?;
//! let store = Arc::new(DeviceStore::new(Box::new(FileStorage::in_data_dir()?)));
//!
//! let directory = PrinterDirectory::new(client.clone(), store.clone());
//! directory.get_default().await?;
//!
//! let channel = CommandChannel::new(client, store);
//! let status = StatusInterpreter::new(channel.clone()).check_status().await;
//! if status.is_ready_to_print {
//!     channel.print_label("Hello").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod device;
pub mod error;
pub mod protocol;
pub mod storage;
pub mod types;

pub use agent::{AgentClient, AgentConfig, AgentResponse, Method, RequestConfig};
pub use device::{CommandChannel, PrinterDirectory};
pub use error::{AgentError, StorageError};
pub use protocol::{label_template, parse_status_reply, StatusInterpreter, STATUS_QUERY};
pub use storage::{DeviceStore, FileStorage, KeyValueStorage, MemoryStorage, SELECTED_DEVICE_KEY};
pub use types::{ConnectionReport, Device, StatusReport};
