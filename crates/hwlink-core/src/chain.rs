//! Chain descriptors and chain-id normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;

/// Descriptor for one supported chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Canonical chain id (e.g. 1 for Ethereum mainnet).
    pub id: u64,
    /// Human-readable name.
    pub name: String,
    /// Preferred RPC endpoint, if the host configured one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

impl Chain {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rpc_url: None,
        }
    }
}

/// Resolved chain identity plus its allow-list verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStatus {
    /// Canonical chain id.
    pub id: u64,
    /// `true` when the id is absent from the configured chain list.
    pub unsupported: bool,
}

impl ChainStatus {
    /// Compute the allow-list verdict for `id` against the configured chains.
    pub fn resolve(id: u64, chains: &[Chain]) -> Self {
        Self {
            id,
            unsupported: !chains.iter().any(|c| c.id == id),
        }
    }
}

/// Convert a chain id to its canonical integer form.
///
/// Transports report the id as a JSON number, a `0x`-prefixed hex string or
/// a decimal string; every comparison site goes through this one function so
/// ids always meet on the same representation.
pub fn normalize_chain_id(raw: &Value) -> Result<u64, ProviderError> {
    match raw {
        Value::Number(n) => n.as_u64().ok_or_else(|| malformed(raw)),
        Value::String(s) => {
            let s = s.trim();
            if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                u64::from_str_radix(hex, 16).map_err(|_| malformed(raw))
            } else {
                s.parse::<u64>().map_err(|_| malformed(raw))
            }
        }
        _ => Err(malformed(raw)),
    }
}

fn malformed(raw: &Value) -> ProviderError {
    ProviderError::Malformed(format!("chain id {raw}"))
}
