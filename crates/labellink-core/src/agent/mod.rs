//! HTTP transport to the print agent.

mod client;

pub use client::{
    retry, AgentClient, AgentConfig, AgentResponse, Method, RequestConfig, DEFAULT_MAX_ATTEMPTS,
};
