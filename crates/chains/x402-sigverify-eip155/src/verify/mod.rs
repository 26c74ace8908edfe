//! Universal signature verification for EVM accounts.
//!
//! [`verify_hash`] answers one question: did the owner of `address` sign `hash`? It works
//! for externally owned accounts, deployed ERC-1271 smart accounts, and counterfactual
//! ERC-6492 accounts that have not been deployed yet, by asking the EIP-6492 universal
//! validator through a single read-only call.
//!
//! Flow:
//! 1. The signature is normalized to canonical bytes ([`SignatureInput::normalize`]).
//! 2. With explicit [`DeploymentParams`], it is wrapped per EIP-6492 unless it already is.
//! 3. A validation call is built for the network's [`ValidatorTarget`] and executed.
//! 4. The returned bytes are decoded as a boolean.
//!
//! When the call reverts, the signer is recovered locally with secp256k1 and compared to
//! `address`. A match is `true`; anything else is `false`. Any other execution failure is
//! an error and never reads as `false`.

mod call;
mod error;
mod executor;
mod recovery;
mod result;
mod signature;

pub use call::*;
pub use error::*;
pub use executor::*;
pub use recovery::*;
pub use result::*;
pub use signature::*;

use alloy_primitives::{Address, B256, Bytes, eip191_hash_message};
use alloy_rpc_types_eth::BlockId;

#[cfg(feature = "telemetry")]
use tracing::instrument;

/// Input of [`verify_hash`].
#[derive(Debug, Clone)]
pub struct VerifyHashRequest {
    /// Claimed signer.
    pub address: Address,
    pub hash: B256,
    pub signature: SignatureInput,
    pub deployment: DeploymentParams,
    /// Block the validation call runs against. Defaults to `latest`.
    pub block: BlockId,
}

impl VerifyHashRequest {
    pub fn new(address: Address, hash: B256, signature: impl Into<SignatureInput>) -> Self {
        Self {
            address,
            hash,
            signature: signature.into(),
            deployment: DeploymentParams::None,
            block: BlockId::default(),
        }
    }

    pub fn with_deployment(mut self, deployment: DeploymentParams) -> Self {
        self.deployment = deployment;
        self
    }

    pub fn at_block(mut self, block: BlockId) -> Self {
        self.block = block;
        self
    }
}

/// Input of [`verify_message`]: the message is hashed per EIP-191 before verification.
#[derive(Debug, Clone)]
pub struct VerifyMessageRequest {
    pub address: Address,
    pub message: Bytes,
    pub signature: SignatureInput,
    pub deployment: DeploymentParams,
    pub block: BlockId,
}

impl VerifyMessageRequest {
    pub fn new(
        address: Address,
        message: impl Into<Bytes>,
        signature: impl Into<SignatureInput>,
    ) -> Self {
        Self {
            address,
            message: message.into(),
            signature: signature.into(),
            deployment: DeploymentParams::None,
            block: BlockId::default(),
        }
    }

    pub fn with_deployment(mut self, deployment: DeploymentParams) -> Self {
        self.deployment = deployment;
        self
    }

    pub fn at_block(mut self, block: BlockId) -> Self {
        self.block = block;
        self
    }
}

impl From<VerifyMessageRequest> for VerifyHashRequest {
    fn from(request: VerifyMessageRequest) -> Self {
        Self {
            address: request.address,
            hash: eip191_hash_message(&request.message),
            signature: request.signature,
            deployment: request.deployment,
            block: request.block,
        }
    }
}

/// Verifies that `request.address` signed `request.hash`.
///
/// # Errors
///
/// - [`VerifyHashError::Encoding`] for malformed signatures, deployment params or result bytes.
/// - [`VerifyHashError::Call`] when the executor fails for any reason other than a revert.
#[cfg_attr(feature = "telemetry", instrument(skip_all, err, fields(address = %request.address, hash = %request.hash, validator = %target)))]
pub async fn verify_hash<E: CallExecutor>(
    executor: &E,
    target: &ValidatorTarget,
    request: &VerifyHashRequest,
) -> Result<bool, VerifyHashError> {
    let signature = request.signature.normalize()?;
    let prepared = request.deployment.apply(signature.clone());
    let payload = build_validation_call(target, request.address, request.hash, prepared);
    match executor.call(payload, request.block).await {
        Ok(output) => Ok(decode_validation_result(&output)?),
        Err(e) if e.is_revert() => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(error = %e, "Validation call reverted, trying local recovery");
            Ok(recovers_to(request.address, &request.hash, &signature))
        }
        Err(e) => Err(VerifyHashError::Call(e)),
    }
}

/// Hashes `request.message` per EIP-191 and runs [`verify_hash`].
pub async fn verify_message<E: CallExecutor>(
    executor: &E,
    target: &ValidatorTarget,
    request: VerifyMessageRequest,
) -> Result<bool, VerifyHashError> {
    let request = VerifyHashRequest::from(request);
    verify_hash(executor, target, &request).await
}

/// Local recovery against the unwrapped signature. Errors count as "not confirmed".
fn recovers_to(address: Address, hash: &B256, signature: &Bytes) -> bool {
    let inner = match Erc6492Signature::decode(signature) {
        Ok(Some(wrapped)) => wrapped.inner,
        Ok(None) => signature.clone(),
        Err(_) => return false,
    };
    match recover_signer(hash, &inner) {
        Ok(recovered) => recovered == address,
        Err(_e) => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(error = %_e, "Local recovery failed");
            false
        }
    }
}
