//! Server side of the JSON-RPC transport: method routing and the axum handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::{RpcError, RpcRequest, RpcResponse, JSONRPC_VERSION};
use crate::service::NotebookService;

/// Route one call to the matching notebook procedure.
pub async fn dispatch(
    service: &NotebookService,
    method: &str,
    params: &Value,
) -> Result<Value, RpcError> {
    let params = Params::new(params)?;

    match method {
        "add_note" => {
            let topic = params.required_str(0, "topic")?;
            let text = params.required_str(1, "text")?;
            let timestamp = params.optional_str(2, "timestamp")?;
            Ok(Value::Bool(service.add_note(topic, text, timestamp).await))
        }
        "get_notes_by_topic" => {
            let topic = params.required_str(0, "topic")?;
            let notes = service.get_notes_by_topic(topic).await;
            serde_json::to_value(notes).map_err(RpcError::server_error)
        }
        "lookup_wikipedia" => {
            let term = params.required_str(0, "term")?;
            match service.lookup_wikipedia(term).await {
                Ok(attached) => Ok(Value::Bool(attached)),
                Err(e) => {
                    tracing::warn!(error = %e, "lookup_wikipedia failed");
                    Err(RpcError::server_error(e))
                }
            }
        }
        other => Err(RpcError::method_not_found(other)),
    }
}

/// `POST /rpc` handler. Always answers with a JSON-RPC response object.
pub async fn handle_rpc(
    State(service): State<NotebookService>,
    body: Bytes,
) -> Json<RpcResponse> {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => return Json(RpcResponse::failure(Value::Null, RpcError::parse_error(e))),
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => return Json(RpcResponse::failure(id, RpcError::invalid_request(e))),
    };
    if request.jsonrpc != JSONRPC_VERSION {
        return Json(RpcResponse::failure(
            request.id,
            RpcError::invalid_request(format!("unsupported jsonrpc version {}", request.jsonrpc)),
        ));
    }

    let response = match dispatch(&service, &request.method, &request.params).await {
        Ok(result) => RpcResponse::success(request.id, result),
        Err(error) => {
            tracing::debug!(method = %request.method, code = error.code, "rpc call failed");
            RpcResponse::failure(request.id, error)
        }
    };
    Json(response)
}

/// Positional or named parameters of a call.
struct Params<'a> {
    raw: &'a Value,
}

impl<'a> Params<'a> {
    fn new(raw: &'a Value) -> Result<Self, RpcError> {
        match raw {
            Value::Array(_) | Value::Object(_) | Value::Null => Ok(Self { raw }),
            _ => Err(RpcError::invalid_params("params must be an array or object")),
        }
    }

    fn get(&self, idx: usize, name: &str) -> Option<&'a Value> {
        match self.raw {
            Value::Array(items) => items.get(idx),
            Value::Object(fields) => fields.get(name),
            _ => None,
        }
    }

    fn required_str(&self, idx: usize, name: &str) -> Result<String, RpcError> {
        match self.get(idx, name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(RpcError::invalid_params(format!("{name} must be a string"))),
            None => Err(RpcError::invalid_params(format!("missing {name}"))),
        }
    }

    fn optional_str(&self, idx: usize, name: &str) -> Result<Option<String>, RpcError> {
        match self.get(idx, name) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Null) | None => Ok(None),
            Some(_) => Err(RpcError::invalid_params(format!("{name} must be a string or null"))),
        }
    }
}
