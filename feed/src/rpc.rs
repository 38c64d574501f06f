//! Minimal JSON-RPC client for read-only ERC-20 calls

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::error::{FeedError, Result};

/// `totalSupply()`
const TOTAL_SUPPLY_SELECTOR: &str = "18160ddd";
/// `balanceOf(address)`
const BALANCE_OF_SELECTOR: &str = "70a08231";
/// `decimals()`
const DECIMALS_SELECTOR: &str = "313ce567";

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

pub struct RpcClient {
    url: String,
    client: reqwest::Client,
}

impl RpcClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }

    /// `eth_call` against the latest block, returning the raw hex result
    pub async fn eth_call(&self, to: &str, data: &str) -> Result<String> {
        debug!(to = %to, data = %data, "→ eth_call");
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [{ "to": to, "data": data }, "latest"],
        });

        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_response(response)
    }

    pub async fn decimals(&self, token: &str) -> Result<u32> {
        let raw = self.eth_call(token, &format!("0x{}", DECIMALS_SELECTOR)).await?;
        let value = decode_word(&raw)?;
        u32::try_from(value)
            .ok()
            .filter(|d| *d <= 36)
            .ok_or_else(|| FeedError::Decode(format!("implausible decimals {}", value)))
    }

    pub async fn total_supply(&self, token: &str, decimals: u32) -> Result<f64> {
        let raw = self
            .eth_call(token, &format!("0x{}", TOTAL_SUPPLY_SELECTOR))
            .await?;
        Ok(scale(decode_word(&raw)?, decimals))
    }

    pub async fn balance_of(&self, token: &str, holder: &str, decimals: u32) -> Result<f64> {
        let raw = self.eth_call(token, &encode_balance_of(holder)?).await?;
        Ok(scale(decode_word(&raw)?, decimals))
    }
}

fn parse_response(response: RpcResponse) -> Result<String> {
    if let Some(err) = response.error {
        return Err(FeedError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    response
        .result
        .ok_or_else(|| FeedError::Decode("response has neither result nor error".to_string()))
}

/// Calldata for `balanceOf(holder)`
pub fn encode_balance_of(holder: &str) -> Result<String> {
    let stripped = holder.strip_prefix("0x").unwrap_or(holder);
    let bytes = hex::decode(stripped)
        .map_err(|e| FeedError::Config(format!("invalid address {}: {}", holder, e)))?;
    if bytes.len() != 20 {
        return Err(FeedError::Config(format!(
            "address {} is {} bytes, expected 20",
            holder,
            bytes.len()
        )));
    }
    Ok(format!("0x{}{:0>64}", BALANCE_OF_SELECTOR, hex::encode(bytes)))
}

/// Decode a single ABI `uint256` word. Values above `u128::MAX` are rejected.
pub fn decode_word(raw: &str) -> Result<u128> {
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    if stripped.is_empty() {
        return Err(FeedError::Decode("empty return data".to_string()));
    }
    let padded = if stripped.len() % 2 == 1 {
        format!("0{}", stripped)
    } else {
        stripped.to_string()
    };
    let bytes = hex::decode(&padded).map_err(|e| FeedError::Decode(e.to_string()))?;
    if bytes.len() > 32 {
        return Err(FeedError::Decode(format!(
            "expected one 32-byte word, got {} bytes",
            bytes.len()
        )));
    }

    let significant = bytes.iter().skip_while(|b| **b == 0).count();
    if significant > 16 {
        return Err(FeedError::Decode("uint256 value overflows u128".to_string()));
    }
    Ok(bytes
        .iter()
        .fold(0u128, |acc, b| (acc << 8) | u128::from(*b)))
}

fn scale(raw: u128, decimals: u32) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}
