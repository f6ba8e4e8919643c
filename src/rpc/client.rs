//! Typed client for the JSON-RPC endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use super::{RpcError, RpcRequest, RpcResponse};
use crate::store::types::Note;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot reach notebook server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server fault: {0}")]
    Fault(RpcError),

    #[error("unexpected response: {0}")]
    Decode(String),
}

pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one call and return its raw result.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(method, params, id);

        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match (response.result, response.error) {
            (_, Some(error)) => Err(ClientError::Fault(error)),
            (Some(result), None) => Ok(result),
            (None, None) => Err(ClientError::Decode(format!(
                "response to {method} has neither result nor error"
            ))),
        }
    }

    async fn call_typed<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ClientError> {
        let result = self.call(method, params).await?;
        serde_json::from_value(result).map_err(|e| ClientError::Decode(format!("{method}: {e}")))
    }

    pub async fn add_note(
        &self,
        topic: &str,
        text: &str,
        timestamp: Option<&str>,
    ) -> Result<bool, ClientError> {
        self.call_typed("add_note", json!([topic, text, timestamp]))
            .await
    }

    pub async fn get_notes_by_topic(&self, topic: &str) -> Result<Vec<Note>, ClientError> {
        self.call_typed("get_notes_by_topic", json!([topic])).await
    }

    pub async fn lookup_wikipedia(&self, term: &str) -> Result<bool, ClientError> {
        self.call_typed("lookup_wikipedia", json!([term])).await
    }
}
