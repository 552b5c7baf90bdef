//! Structured error types and the connect-outcome classifier.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error code a wallet reports when the user declines a request in its UI.
pub const CODE_USER_REJECTED: i64 = 4001;

/// Error code a wallet reports when another request is already pending.
pub const CODE_RESOURCE_UNAVAILABLE: i64 = -32002;

/// JSON-RPC style error object returned by a wallet provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorPayload {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl std::fmt::Display for RpcErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "provider error {}: {}", self.code, self.message)
    }
}

/// Errors that can occur on a wallet-provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Error object returned by the provider itself.
    #[error("{0}")]
    Rpc(RpcErrorPayload),

    /// Transport-level failure (bridge unreachable, relay dropped, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// Response could not be deserialized.
    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A value received from the provider is malformed.
    #[error("malformed provider value: {0}")]
    Malformed(String),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// The provider-reported error code, if this wraps an RPC error object.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc(payload) => Some(payload.code),
            _ => None,
        }
    }

    /// Returns `true` if the user explicitly declined the request.
    pub fn is_user_rejection(&self) -> bool {
        self.code() == Some(CODE_USER_REJECTED)
    }
}

/// Outcome of a `connect()` attempt, classified into a closed set.
///
/// Nothing here is retried internally; every variant is terminal for the
/// in-flight call.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The user explicitly declined the request in the wallet UI.
    #[error("user rejected the request")]
    UserRejected(#[source] ProviderError),

    /// Another request is already pending on the transport.
    #[error("a request is already pending on the transport")]
    ResourceBusy(#[source] ProviderError),

    /// The provider granted access but reported no accounts.
    #[error("provider returned no accounts")]
    NoAccounts,

    /// No usable transport implementation could be resolved.
    #[error("transport resolution failed")]
    ResolutionFailed(#[source] ProviderError),

    /// Any other provider failure, original preserved as cause.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Map a raw provider error onto the connect-outcome taxonomy.
///
/// Called only at the call sites that drive the connect sequence, so a
/// rejection during account/chain discovery stays distinguishable from a
/// rejection during transport resolution (wrapped in
/// [`ConnectError::ResolutionFailed`] there instead).
pub fn classify(err: ProviderError) -> ConnectError {
    match err.code() {
        Some(CODE_USER_REJECTED) => ConnectError::UserRejected(err),
        Some(CODE_RESOURCE_UNAVAILABLE) => ConnectError::ResourceBusy(err),
        _ => ConnectError::Provider(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc_err(code: i64) -> ProviderError {
        ProviderError::Rpc(RpcErrorPayload {
            code,
            message: "test".into(),
            data: None,
        })
    }

    #[test]
    fn user_rejection_is_distinct() {
        let out = classify(rpc_err(CODE_USER_REJECTED));
        assert!(matches!(out, ConnectError::UserRejected(_)));
    }

    #[test]
    fn resource_busy_is_distinct() {
        let out = classify(rpc_err(CODE_RESOURCE_UNAVAILABLE));
        assert!(matches!(out, ConnectError::ResourceBusy(_)));
    }

    #[test]
    fn other_codes_pass_through() {
        let out = classify(rpc_err(-32000));
        match out {
            ConnectError::Provider(ProviderError::Rpc(payload)) => {
                assert_eq!(payload.code, -32000);
            }
            other => panic!("expected passthrough, got {other:?}"),
        }
    }

    #[test]
    fn non_rpc_errors_pass_through() {
        let out = classify(ProviderError::Transport("bridge closed".into()));
        assert!(matches!(out, ConnectError::Provider(_)));
    }

    #[test]
    fn user_rejection_predicate() {
        assert!(rpc_err(CODE_USER_REJECTED).is_user_rejection());
        assert!(!rpc_err(-32000).is_user_rejection());
        assert!(!ProviderError::Other("x".into()).is_user_rejection());
    }
}
