//! hwlink-connector — the connection lifecycle state machine.
//!
//! # Overview
//!
//! The connector drives one hardware-wallet session end to end:
//!
//! - [`TransportResolver`] probes which transport implementation was granted
//!   and hands back a live capability handle (resolved at most once per
//!   connector instance)
//! - [`Connector`] owns the lifecycle (`Idle → Connecting → Connected →
//!   Idle`), discovers account and chain identity, and persists the
//!   disconnect shim flag for the relay-mediated transport
//! - the event forwarder re-emits raw transport events in the framework's
//!   normalized vocabulary
//! - [`WalletSigner`] composes account + provider into a signer facade
//!
//! # Quick start
//! ```rust,no_run
//! use std::sync::Arc;
//! use hwlink_connector::{Connector, ConnectorConfig, TransportResolver};
//! use hwlink_core::{Chain, MemoryStore};
//!
//! # async fn run(resolver: Arc<dyn TransportResolver>) -> anyhow::Result<()> {
//! let config = ConnectorConfig {
//!     chains: vec![Chain::new(1, "Ethereum")],
//!     ..Default::default()
//! };
//! let (connector, mut events) = Connector::new(config, resolver, Arc::new(MemoryStore::new()));
//! let session = connector.connect(Some(1)).await?;
//! println!("connected as {}", session.account);
//! # Ok(()) }
//! ```

pub mod config;
pub mod connector;
mod forwarder;
pub mod logging;
pub mod resolver;
pub mod signer;

pub use config::ConnectorConfig;
pub use connector::{ConnectResult, ConnectionState, Connector};
pub use resolver::{
    FnResolver, ResolveIntent, ResolvedTransport, TransportKind, TransportResolver,
};
pub use signer::WalletSigner;
