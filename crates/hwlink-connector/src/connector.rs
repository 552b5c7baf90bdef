//! The connection state machine.
//!
//! One `Connector` drives one session at a time through
//! `Idle → Connecting → Connected → Idle`. There is no error state: a
//! failure during `Connecting` lands the machine back at `Idle` and the
//! error propagates to the caller. No call here is retried internally.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, Mutex};

use hwlink_core::address::to_checksum_address;
use hwlink_core::chain::{normalize_chain_id, ChainStatus};
use hwlink_core::error::{classify, ConnectError, ProviderError};
use hwlink_core::event::{ConnectorEvent, MessageKind};
use hwlink_core::provider::{WalletProvider, ETH_ACCOUNTS, ETH_CHAIN_ID, ETH_REQUEST_ACCOUNTS};
use hwlink_core::storage::{KeyValueStore, SHIM_DISCONNECT_KEY};

use crate::config::ConnectorConfig;
use crate::forwarder::ForwarderHandle;
use crate::resolver::{ResolveIntent, ResolvedTransport, TransportKind, TransportResolver};
use crate::signer::WalletSigner;

/// Lifecycle states of the connection machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Connected,
}

/// Data returned to the framework on a successful `connect`.
#[derive(Clone)]
pub struct ConnectResult {
    /// Checksum-cased account address.
    pub account: String,
    /// Resolved chain identity and allow-list verdict.
    pub chain: ChainStatus,
    /// The capability handle, usable as a standard JSON-RPC provider.
    pub provider: Arc<dyn WalletProvider>,
}

impl std::fmt::Debug for ConnectResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectResult")
            .field("account", &self.account)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

/// Session slot guarded by the per-instance in-flight lock.
struct SessionSlot {
    /// Resolved transport, cached for the connector's lifetime.
    resolved: Option<ResolvedTransport>,
    /// Live event forwarding attachment, if any.
    forwarder: Option<ForwarderHandle>,
    state: ConnectionState,
}

impl Default for SessionSlot {
    fn default() -> Self {
        Self {
            resolved: None,
            forwarder: None,
            state: ConnectionState::Idle,
        }
    }
}

/// Hardware-wallet connector: owns the connection lifecycle.
///
/// Normalized lifecycle events flow through the receiver returned by
/// [`Connector::new`].
pub struct Connector {
    config: ConnectorConfig,
    resolver: Arc<dyn TransportResolver>,
    store: Arc<dyn KeyValueStore>,
    events_tx: mpsc::UnboundedSender<ConnectorEvent>,
    // Single-slot lock: overlapping connect/disconnect calls serialize here
    // instead of racing on the cached handle.
    session: Mutex<SessionSlot>,
}

impl Connector {
    /// Build a connector; the receiver carries normalized lifecycle events.
    pub fn new(
        config: ConnectorConfig,
        resolver: Arc<dyn TransportResolver>,
        store: Arc<dyn KeyValueStore>,
    ) -> (Self, mpsc::UnboundedReceiver<ConnectorEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let connector = Self {
            config,
            resolver,
            store,
            events_tx,
            session: Mutex::new(SessionSlot::default()),
        };
        (connector, events_rx)
    }

    /// Establish a session, discovering account and chain identity.
    ///
    /// `desired_chain_id` expresses intent only: the transport decides which
    /// chain the session lands on, and a mismatch is logged, not corrected.
    pub async fn connect(
        &self,
        desired_chain_id: Option<u64>,
    ) -> Result<ConnectResult, ConnectError> {
        let mut slot = self.session.lock().await;
        slot.state = ConnectionState::Connecting;
        match self.connect_inner(&mut slot, desired_chain_id).await {
            Ok(result) => {
                slot.state = ConnectionState::Connected;
                Ok(result)
            }
            Err(err) => {
                slot.state = ConnectionState::Idle;
                Err(err)
            }
        }
    }

    async fn connect_inner(
        &self,
        slot: &mut SessionSlot,
        desired_chain_id: Option<u64>,
    ) -> Result<ConnectResult, ConnectError> {
        let resolved = self.acquire(slot, desired_chain_id).await?;
        let provider = Arc::clone(&resolved.provider);

        if slot.forwarder.is_none() {
            slot.forwarder = ForwarderHandle::attach(
                Arc::clone(&provider),
                self.config.chains.clone(),
                self.config.shim_disconnect,
                Arc::clone(&self.store),
                self.events_tx.clone(),
            );
        }
        self.emit(ConnectorEvent::Message(MessageKind::Connecting));

        // Account discovery strictly before chain discovery.
        let accounts: Vec<String> = provider
            .call(ETH_REQUEST_ACCOUNTS, vec![])
            .await
            .map_err(classify)?;
        let account = match accounts.first() {
            Some(raw) => to_checksum_address(raw).map_err(ConnectError::Provider)?,
            None => return Err(ConnectError::NoAccounts),
        };

        let raw_chain: Value = provider
            .call(ETH_CHAIN_ID, vec![])
            .await
            .map_err(classify)?;
        let chain_id = normalize_chain_id(&raw_chain).map_err(ConnectError::Provider)?;
        let chain = ChainStatus::resolve(chain_id, &self.config.chains);

        if let Some(desired) = desired_chain_id {
            if desired != chain_id {
                // The transport decides the chain; no automatic switch.
                tracing::info!(
                    desired,
                    resolved = chain_id,
                    "connected on a different chain than requested"
                );
            }
        }

        if self.config.shim_disconnect && resolved.kind == TransportKind::RelayBridge {
            self.store.set(SHIM_DISCONNECT_KEY, "true");
        }

        tracing::debug!(
            account = %account,
            chain_id,
            unsupported = chain.unsupported,
            transport = %resolved.kind,
            "session established"
        );
        Ok(ConnectResult {
            account,
            chain,
            provider,
        })
    }

    /// Tear the session down and return to `Idle`.
    ///
    /// Idempotent: with no active session this is a no-op apart from
    /// clearing the shim flag, and it never resolves a transport (teardown
    /// must not trigger a user-approval prompt). The resolved handle stays
    /// cached for later reconnects.
    pub async fn disconnect(&self) -> Result<(), ProviderError> {
        let mut slot = self.session.lock().await;

        let mut result = Ok(());
        if slot.state == ConnectionState::Connected {
            if let Some(resolved) = slot.resolved.as_ref() {
                if resolved.kind == TransportKind::RelayBridge {
                    // The one transport with a real disconnect signal.
                    result = resolved.provider.disconnect().await;
                }
            }
        }

        if let Some(forwarder) = slot.forwarder.take() {
            forwarder.detach();
        }
        if self.config.shim_disconnect {
            self.store.remove(SHIM_DISCONNECT_KEY);
        }
        slot.state = ConnectionState::Idle;
        tracing::debug!("session torn down");
        result
    }

    /// Whether a session can be considered valid without prompting the user.
    ///
    /// When the shim flag is present the transport is never consulted: the
    /// session is reported unauthorized until a fresh `connect`. Otherwise
    /// this is a best-effort `eth_accounts` probe — every error is swallowed
    /// and reported as `false`.
    pub async fn is_authorized(&self) -> bool {
        if self.config.shim_disconnect && self.store.get(SHIM_DISCONNECT_KEY).is_some() {
            return false;
        }
        match self.current_accounts().await {
            Ok(accounts) => !accounts.is_empty(),
            Err(err) => {
                tracing::debug!(error = %err, "authorization probe failed");
                false
            }
        }
    }

    /// Current first account, checksum-cased. Re-queries the transport on
    /// every call rather than trusting cached session data.
    pub async fn account(&self) -> Result<String, ConnectError> {
        let accounts = self.current_accounts().await?;
        match accounts.first() {
            Some(raw) => to_checksum_address(raw).map_err(ConnectError::Provider),
            None => Err(ConnectError::NoAccounts),
        }
    }

    /// Active chain id in canonical form. Re-queries the transport on every
    /// call.
    pub async fn chain_id(&self) -> Result<u64, ConnectError> {
        let provider = self.provider().await?;
        let raw: Value = provider.call(ETH_CHAIN_ID, vec![]).await.map_err(classify)?;
        normalize_chain_id(&raw).map_err(ConnectError::Provider)
    }

    /// Compose provider, fresh account and fresh chain id into a signer
    /// facade.
    pub async fn signer(&self) -> Result<WalletSigner, ConnectError> {
        let provider = self.provider().await?;
        let (account, chain_id) = tokio::try_join!(self.account(), self.chain_id())?;
        Ok(WalletSigner::new(provider, account, chain_id))
    }

    /// The capability handle, resolving the transport on first use.
    pub async fn provider(&self) -> Result<Arc<dyn WalletProvider>, ConnectError> {
        let mut slot = self.session.lock().await;
        Ok(self.acquire(&mut slot, None).await?.provider)
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> ConnectionState {
        self.session.lock().await.state
    }

    /// Resolve-or-return-cached transport. Resolution happens at most once
    /// per connector instance; failures are terminal for the attempt.
    async fn acquire(
        &self,
        slot: &mut SessionSlot,
        chain_id: Option<u64>,
    ) -> Result<ResolvedTransport, ConnectError> {
        if let Some(resolved) = slot.resolved.clone() {
            return Ok(resolved);
        }
        let intent = ResolveIntent {
            chain_id,
            rpc_urls: self.config.rpc_urls.clone(),
            bridge_url: self.config.bridge_url.clone(),
        };
        tracing::debug!(?chain_id, "resolving transport");
        let resolved = self
            .resolver
            .resolve(&intent)
            .await
            .map_err(ConnectError::ResolutionFailed)?;
        tracing::debug!(transport = %resolved.kind, "transport resolved");
        slot.resolved = Some(resolved.clone());
        Ok(resolved)
    }

    async fn current_accounts(&self) -> Result<Vec<String>, ConnectError> {
        let provider = self.provider().await?;
        provider.call(ETH_ACCOUNTS, vec![]).await.map_err(classify)
    }

    fn emit(&self, event: ConnectorEvent) {
        let _ = self.events_tx.send(event);
    }
}
