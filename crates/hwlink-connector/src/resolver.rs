//! Transport resolution — probing which concrete transport was granted.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use hwlink_core::error::ProviderError;
use hwlink_core::provider::WalletProvider;

/// Which concrete transport implementation a session landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Direct browser-extension bridge to the device. Supports real
    /// re-authorization checks, so no shim flag is written for it.
    ExtensionBridge,
    /// Relay-mediated bridge (external app behind a relay). The one
    /// transport with a real programmatic disconnect, but no way to forget
    /// a grant — sessions on it are shimmed.
    RelayBridge,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExtensionBridge => write!(f, "extension-bridge"),
            Self::RelayBridge => write!(f, "relay-bridge"),
        }
    }
}

/// Connection intent handed to the resolver.
#[derive(Debug, Clone, Default)]
pub struct ResolveIntent {
    /// Chain the caller would like to start on.
    pub chain_id: Option<u64>,
    /// Fallback RPC endpoint per chain id.
    pub rpc_urls: HashMap<u64, String>,
    /// Relay-bridge endpoint override.
    pub bridge_url: Option<String>,
}

/// A live capability handle plus the transport kind the probe settled on.
#[derive(Clone)]
pub struct ResolvedTransport {
    pub provider: Arc<dyn WalletProvider>,
    pub kind: TransportKind,
}

/// Probes which transport implementation is usable for an intent.
///
/// Resolution may suspend for an unbounded time — it can involve the user
/// approving the connection in an external application — and is never
/// retried here; a failure or rejection is terminal for the attempt. The
/// connector caches the result for its lifetime.
#[async_trait]
pub trait TransportResolver: Send + Sync + 'static {
    async fn resolve(&self, intent: &ResolveIntent) -> Result<ResolvedTransport, ProviderError>;
}

/// Adapter turning an async closure into a [`TransportResolver`].
pub struct FnResolver<F> {
    f: F,
}

impl<F> FnResolver<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> TransportResolver for FnResolver<F>
where
    F: Fn(ResolveIntent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ResolvedTransport, ProviderError>> + Send + 'static,
{
    async fn resolve(&self, intent: &ResolveIntent) -> Result<ResolvedTransport, ProviderError> {
        (self.f)(intent.clone()).await
    }
}
