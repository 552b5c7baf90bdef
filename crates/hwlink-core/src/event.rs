//! Event vocabularies and the subscription plumbing transports embed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::chain::ChainStatus;

/// Raw event pushed by a transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// The set of granted accounts changed (may be empty).
    AccountsChanged(Vec<String>),
    /// The active chain changed; the id arrives however the transport
    /// encoded it (hex string or number).
    ChainChanged(Value),
    /// The remote side ended the session.
    Disconnected,
}

/// Lifecycle notice kinds carried by [`ConnectorEvent::Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// A connection attempt is in flight.
    Connecting,
}

/// Lifecycle signals in the framework's normalized vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorEvent {
    /// Progress notice for an in-flight connection attempt.
    Message(MessageKind),
    /// Account and/or chain identity changed.
    Change {
        /// Checksum-cased address, when the account changed.
        account: Option<String>,
        /// Resolved chain identity, when the chain changed.
        chain: Option<ChainStatus>,
    },
    /// The session ended, locally or remotely. No payload.
    Disconnect,
}

/// Identifier for one attached event subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Event subscription capability of a transport handle.
pub trait EventSource: Send + Sync {
    /// Attach a listener; events are delivered through the returned receiver.
    fn subscribe(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<TransportEvent>);

    /// Detach exactly the listener registered under `id`.
    fn unsubscribe(&self, id: &SubscriptionId);
}

/// Fan-out bus a concrete transport embeds to implement [`EventSource`].
///
/// Listeners are keyed by id so detaching removes precisely the listener
/// that was attached, keeping repeated connect/disconnect cycles leak-free.
#[derive(Default)]
pub struct EventBus {
    listeners: Mutex<HashMap<u64, mpsc::UnboundedSender<TransportEvent>>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every attached listener.
    pub fn emit(&self, event: TransportEvent) {
        let listeners = self.listeners.lock().unwrap();
        tracing::trace!(?event, listeners = listeners.len(), "dispatching transport event");
        for tx in listeners.values() {
            let _ = tx.send(event.clone());
        }
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Returns `true` if no listener is attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSource for EventBus {
    fn subscribe(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<TransportEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap().insert(id, tx);
        (SubscriptionId(id), rx)
    }

    fn unsubscribe(&self, id: &SubscriptionId) {
        self.listeners.lock().unwrap().remove(&id.0);
    }
}
