//! Signer facade composing an account with its provider handle.

use std::sync::Arc;

use alloy_primitives::hex;
use serde_json::json;

use hwlink_core::error::ProviderError;
use hwlink_core::provider::WalletProvider;

/// Signer-capable view over a connected session.
///
/// Signing itself happens inside the wallet behind the capability
/// interface; this facade only carries identity and routes requests.
#[derive(Clone)]
pub struct WalletSigner {
    provider: Arc<dyn WalletProvider>,
    account: String,
    chain_id: u64,
}

impl WalletSigner {
    pub(crate) fn new(provider: Arc<dyn WalletProvider>, account: String, chain_id: u64) -> Self {
        Self {
            provider,
            account,
            chain_id,
        }
    }

    /// Checksum-cased account this signer acts for.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Chain the signer was composed on.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The underlying capability handle.
    pub fn provider(&self) -> &Arc<dyn WalletProvider> {
        &self.provider
    }

    /// Ask the wallet to sign a human-readable message (`personal_sign`).
    pub async fn sign_message(&self, message: &str) -> Result<String, ProviderError> {
        let payload = hex::encode_prefixed(message.as_bytes());
        let result = self
            .provider
            .request("personal_sign", vec![json!(payload), json!(self.account)])
            .await?;
        serde_json::from_value(result).map_err(ProviderError::Deserialization)
    }
}
