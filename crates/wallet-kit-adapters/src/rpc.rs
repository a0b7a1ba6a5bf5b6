//! Minimal JSON-RPC 2.0 client over blocking HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, Bytes, U256};
use serde_json::Value;
use tracing::trace;

use wallet_kit_core::PortError;

#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    url: String,
    client: reqwest::blocking::Client,
    next_id: Arc<AtomicU64>,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PortError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self {
            url: url.into(),
            client,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        trace!(method, id, url = %self.url, "json-rpc request");

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .map_err(|e| PortError::Transport(format!("{method} request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Transport(format!("{method} json decode failed: {e}")))?;
        if let Some(err) = body.get("error") {
            return Err(rpc_error(method, err));
        }
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "{method} http status {status}: {body}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport(format!("{method} response missing result")))
    }
}

/// EIP-1193 code 4001 means the user declined; everything else is transport.
fn rpc_error(method: &str, err: &Value) -> PortError {
    let code = err.get("code").and_then(Value::as_i64);
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    match code {
        Some(4001) => PortError::Rejected(message.to_owned()),
        Some(code) => PortError::Transport(format!("{method} returned error {code}: {message}")),
        None => PortError::Transport(format!("{method} returned error: {err}")),
    }
}

pub fn parse_quantity(value: &Value) -> Result<U256, PortError> {
    match value {
        Value::String(s) => {
            let hex = s
                .strip_prefix("0x")
                .or_else(|| s.strip_prefix("0X"))
                .ok_or_else(|| PortError::Validation(format!("quantity must be hex: {s}")))?;
            U256::from_str_radix(hex, 16)
                .map_err(|e| PortError::Validation(format!("invalid hex quantity {s}: {e}")))
        }
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| PortError::Validation(format!("invalid numeric quantity: {n}"))),
        other => Err(PortError::Validation(format!(
            "unexpected quantity value: {other}"
        ))),
    }
}

pub fn parse_u64_quantity(value: &Value) -> Result<u64, PortError> {
    let quantity = parse_quantity(value)?;
    u64::try_from(quantity)
        .map_err(|_| PortError::Validation(format!("quantity exceeds u64: {quantity}")))
}

pub fn format_quantity(value: u64) -> String {
    format!("{value:#x}")
}

pub fn parse_address_list(value: &Value) -> Result<Vec<Address>, PortError> {
    let arr = value
        .as_array()
        .ok_or_else(|| PortError::Validation("accounts result must be an array".to_owned()))?;
    arr.iter()
        .map(|item| {
            let raw = item
                .as_str()
                .ok_or_else(|| PortError::Validation("account must be a string".to_owned()))?;
            raw.parse::<Address>()
                .map_err(|e| PortError::Validation(format!("invalid account {raw}: {e}")))
        })
        .collect()
}

pub fn parse_bytes(value: &Value) -> Result<Bytes, PortError> {
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Validation("expected hex bytes string".to_owned()))?;
    raw.parse::<Bytes>()
        .map_err(|e| PortError::Validation(format!("invalid hex bytes: {e}")))
}
