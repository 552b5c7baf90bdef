//! The `WalletProvider` trait — the capability interface every transport
//! handle must satisfy.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ProviderError;
use crate::event::EventSource;

/// RPC method that prompts the wallet for account access.
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";

/// RPC method returning already-granted accounts without prompting.
pub const ETH_ACCOUNTS: &str = "eth_accounts";

/// RPC method returning the active chain id.
pub const ETH_CHAIN_ID: &str = "eth_chainId";

/// A resolved transport capability handle.
///
/// The connector only ever treats the handle as opaque: request/response
/// calls, an optional event capability, and a disconnect signal. Which
/// concrete transport sits behind it is decided once, at resolution time.
///
/// # Object Safety
/// The trait is object-safe and is held as `Arc<dyn WalletProvider>`.
#[async_trait]
pub trait WalletProvider: Send + Sync + 'static {
    /// Send a JSON-RPC style request and return the raw result value.
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, ProviderError>;

    /// Event capability marker.
    ///
    /// Returns `None` for transports that cannot push remote state changes.
    /// Checked once when listeners are attached, never probed ad hoc.
    fn events(&self) -> Option<&dyn EventSource> {
        None
    }

    /// Tell the transport to end the session.
    ///
    /// Only the relay-mediated transport honors this with a real teardown;
    /// the default is a no-op.
    async fn disconnect(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Sub-providers aggregated behind this handle (injected-provider
    /// pattern). The connector never descends into them.
    fn sub_providers(&self) -> Vec<Arc<dyn WalletProvider>> {
        Vec::new()
    }
}

impl dyn WalletProvider {
    /// Convenience: call a method and deserialize the result.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, ProviderError> {
        let result = self.request(method, params).await?;
        serde_json::from_value(result).map_err(ProviderError::Deserialization)
    }
}
