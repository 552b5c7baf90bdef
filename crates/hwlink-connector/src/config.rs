//! Connector configuration.

use std::collections::HashMap;

use hwlink_core::chain::Chain;

/// Immutable configuration owned by a connector for its whole lifetime.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Ordered allow-list of supported chains.
    pub chains: Vec<Chain>,
    /// Relay-bridge endpoint override.
    pub bridge_url: Option<String>,
    /// Fallback RPC endpoint per chain id.
    pub rpc_urls: HashMap<u64, String>,
    /// Emit debug-level connector logs.
    pub debug: bool,
    /// Persist the disconnect shim flag for relay-mediated sessions.
    pub shim_disconnect: bool,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            chains: Vec::new(),
            bridge_url: None,
            rpc_urls: HashMap::new(),
            debug: false,
            shim_disconnect: true,
        }
    }
}
