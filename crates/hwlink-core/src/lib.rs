//! hwlink-core — capability interface and shared types for hwlink.
//!
//! # Overview
//!
//! hwlink adapts a hardware-wallet-backed Ethereum provider to a generic
//! wallet-connection framework, abstracting over the two transports a wallet
//! session can land on (direct browser-extension bridge vs. relay-mediated
//! bridge). The core crate defines:
//!
//! - [`WalletProvider`] — the capability interface every transport satisfies
//! - [`TransportEvent`] / [`ConnectorEvent`] — raw and normalized event vocabularies
//! - [`EventSource`] / [`EventBus`] — subscription plumbing transports embed
//! - [`ProviderError`] / [`ConnectError`] — structured errors and the connect classifier
//! - [`KeyValueStore`] — injected storage backing the disconnect shim flag
//! - chain-id and address helpers shared by every call site

pub mod address;
pub mod chain;
pub mod error;
pub mod event;
pub mod provider;
pub mod storage;

pub use chain::{normalize_chain_id, Chain, ChainStatus};
pub use error::{classify, ConnectError, ProviderError, RpcErrorPayload};
pub use event::{
    ConnectorEvent, EventBus, EventSource, MessageKind, SubscriptionId, TransportEvent,
};
pub use provider::WalletProvider;
pub use storage::{KeyValueStore, MemoryStore, SHIM_DISCONNECT_KEY};
