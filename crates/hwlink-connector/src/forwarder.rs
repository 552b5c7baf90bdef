//! Forwards raw transport events into the framework's event vocabulary.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use hwlink_core::address::to_checksum_address;
use hwlink_core::chain::{normalize_chain_id, Chain, ChainStatus};
use hwlink_core::event::{ConnectorEvent, SubscriptionId, TransportEvent};
use hwlink_core::provider::WalletProvider;
use hwlink_core::storage::{KeyValueStore, SHIM_DISCONNECT_KEY};

/// A live event-forwarding attachment.
///
/// Holds the exact subscription id that was registered, so detaching removes
/// that listener and nothing else across repeated connect/disconnect cycles.
pub(crate) struct ForwarderHandle {
    provider: Arc<dyn WalletProvider>,
    subscription: SubscriptionId,
    task: JoinHandle<()>,
}

impl ForwarderHandle {
    /// Subscribe to the handle's events and spawn the translation task.
    ///
    /// Returns `None` when the handle has no event capability.
    pub(crate) fn attach(
        provider: Arc<dyn WalletProvider>,
        chains: Vec<Chain>,
        shim_disconnect: bool,
        store: Arc<dyn KeyValueStore>,
        events_tx: mpsc::UnboundedSender<ConnectorEvent>,
    ) -> Option<Self> {
        let source = provider.events()?;
        let (subscription, rx) = source.subscribe();
        let task = tokio::spawn(forward(rx, chains, shim_disconnect, store, events_tx));
        tracing::debug!(?subscription, "event forwarding attached");
        Some(Self {
            provider,
            subscription,
            task,
        })
    }

    /// Unsubscribe the attached listener and stop the translation task.
    pub(crate) fn detach(self) {
        if let Some(source) = self.provider.events() {
            source.unsubscribe(&self.subscription);
        }
        self.task.abort();
        tracing::debug!(subscription = ?self.subscription, "event forwarding detached");
    }
}

async fn forward(
    mut rx: mpsc::UnboundedReceiver<TransportEvent>,
    chains: Vec<Chain>,
    shim_disconnect: bool,
    store: Arc<dyn KeyValueStore>,
    events_tx: mpsc::UnboundedSender<ConnectorEvent>,
) {
    while let Some(event) = rx.recv().await {
        let out = match event {
            TransportEvent::AccountsChanged(accounts) => match accounts.first() {
                None => ConnectorEvent::Disconnect,
                Some(raw) => match to_checksum_address(raw) {
                    Ok(account) => ConnectorEvent::Change {
                        account: Some(account),
                        chain: None,
                    },
                    Err(err) => {
                        tracing::warn!(error = %err, "dropping accountsChanged event with malformed address");
                        continue;
                    }
                },
            },
            TransportEvent::ChainChanged(raw) => match normalize_chain_id(&raw) {
                Ok(id) => ConnectorEvent::Change {
                    account: None,
                    chain: Some(ChainStatus::resolve(id, &chains)),
                },
                Err(err) => {
                    tracing::warn!(error = %err, "dropping chainChanged event with malformed id");
                    continue;
                }
            },
            TransportEvent::Disconnected => {
                // The remote side ended the session; the persisted flag must
                // not keep reporting a live grant it can no longer fake.
                if shim_disconnect {
                    store.remove(SHIM_DISCONNECT_KEY);
                }
                ConnectorEvent::Disconnect
            }
        };
        if events_tx.send(out).is_err() {
            return; // framework receiver dropped
        }
    }
}
