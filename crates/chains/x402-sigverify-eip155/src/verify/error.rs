//! Error taxonomy for universal signature verification.
//!
//! Only two kinds reach callers of [`verify_hash`](super::verify_hash): bad input
//! ([`EncodingError`]) and an infrastructure failure of the remote call
//! ([`CallExecutionError`] other than a revert). A revert is consumed by the
//! verifier and resolves to a boolean.

use alloy_json_rpc::{ErrorPayload, RpcError};
use alloy_primitives::{Bytes, hex};
use alloy_transport::TransportError;

/// Malformed input or malformed remote output. Never retried, never converted to `false`.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Malformed signature hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Unsupported recovery id {0}, expected one of 0, 1, 27, 28")]
    InvalidRecoveryId(u64),
    #[error("Signature has neither v nor yParity")]
    MissingRecoveryId,
    #[error("v = {v} disagrees with yParity = {y_parity}")]
    InconsistentParity { v: u64, y_parity: u64 },
    #[error("Malformed ERC-6492 signature wrapper: {0}")]
    InvalidErc6492(#[source] alloy_sol_types::Error),
    #[error("Validator returned non-boolean data {0}")]
    InvalidBoolean(Bytes),
    #[error("Deployment params require both factory and factoryData")]
    PartialDeployment,
}

/// Failure of the remote validation call.
#[derive(Debug, thiserror::Error)]
pub enum CallExecutionError {
    /// The node executed the call and the validator logic rejected it.
    #[error("Validation call reverted: {message}")]
    Reverted { message: String },
    /// Network, serialization, rate limiting or node availability problem.
    #[error(transparent)]
    Transport(TransportError),
}

impl CallExecutionError {
    pub fn is_revert(&self) -> bool {
        matches!(self, CallExecutionError::Reverted { .. })
    }
}

/// EVM revert as reported by the node: code `3`, revert data, or a message naming the revert
/// ("execution reverted", "VM Exception while processing transaction: revert", ...).
fn is_revert_payload(payload: &ErrorPayload) -> bool {
    payload.code == 3
        || payload.as_revert_data().is_some()
        || payload.message.to_ascii_lowercase().contains("revert")
}

/// Only revert-shaped JSON-RPC errors count as a revert.
///
/// Other error objects (rate limits such as `-32005`, "header not found", `-32603`
/// internal errors) mean the node did not run the validator, so they stay transport
/// failures together with everything that prevented an answer.
impl From<TransportError> for CallExecutionError {
    fn from(e: TransportError) -> Self {
        match e {
            RpcError::ErrorResp(payload) if is_revert_payload(&payload) => {
                CallExecutionError::Reverted {
                    message: payload.message.to_string(),
                }
            }
            other => CallExecutionError::Transport(other),
        }
    }
}

/// Error returned by [`verify_hash`](super::verify_hash).
#[derive(Debug, thiserror::Error)]
pub enum VerifyHashError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// The validation call failed for a reason other than a revert.
    #[error("Could not complete remote validation: {0}")]
    Call(CallExecutionError),
}
