//! Seams between the verification algorithm and a remote node.

use alloy_primitives::Bytes;
use alloy_rpc_types_eth::BlockId;
use std::future::Future;
use std::sync::Arc;

use crate::verify::{CallExecutionError, CallPayload, ValidatorTarget};

/// Executes a read-only call, or a creation-style simulation when `payload.to` is `None`.
///
/// Implementations must report a contract-level revert as [`CallExecutionError::Reverted`]
/// and everything else (connectivity, timeouts, malformed responses) as another variant,
/// since only reverts trigger the local-recovery fallback.
pub trait CallExecutor {
    fn call(
        &self,
        payload: CallPayload,
        block: BlockId,
    ) -> impl Future<Output = Result<Bytes, CallExecutionError>> + Send;
}

impl<T: CallExecutor + Send + Sync> CallExecutor for Arc<T> {
    fn call(
        &self,
        payload: CallPayload,
        block: BlockId,
    ) -> impl Future<Output = Result<Bytes, CallExecutionError>> + Send {
        self.as_ref().call(payload, block)
    }
}

/// Tells whether a universal validator contract is deployed on a network.
pub trait ValidatorTargetSource {
    fn validator_target(&self) -> ValidatorTarget;
}

impl<T: ValidatorTargetSource> ValidatorTargetSource for Arc<T> {
    fn validator_target(&self) -> ValidatorTarget {
        self.as_ref().validator_target()
    }
}
