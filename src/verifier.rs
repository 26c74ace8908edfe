//! The verification service behind the HTTP endpoints.
//!
//! [`VerifierLocal`] resolves the request's network to a configured chain provider and
//! runs [`verify_hash`] against it. Providers are anything that can execute calls and
//! knows its validator, so tests plug in scripted ones.

use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::Arc;
use x402_sigverify_eip155::verify::{
    CallExecutionError, CallExecutor, DeploymentParams, EncodingError, ValidatorTargetSource,
    VerifyHashError, VerifyHashRequest, verify_hash,
};
use x402_sigverify_types::chain::{ChainId, ChainProviderOps, ChainRegistry};
use x402_sigverify_types::networks::network_name_by_chain_id;

use crate::proto::{self, SubjectError};

/// Asynchronous interface of a signature verifier.
pub trait Verifier {
    type Error: Debug + Display;

    /// Checks whether `request.address` signed the request's hash or message.
    ///
    /// An invalid signature is `Ok` with `is_valid: false`; errors are reserved for
    /// malformed requests, unknown networks and infrastructure failures.
    fn verify(
        &self,
        request: &proto::VerifyRequest,
    ) -> impl Future<Output = Result<proto::VerifyResponse, Self::Error>> + Send;

    fn supported(
        &self,
    ) -> impl Future<Output = Result<proto::SupportedResponse, Self::Error>> + Send;
}

impl<T: Verifier + Send + Sync> Verifier for Arc<T> {
    type Error = T::Error;

    fn verify(
        &self,
        request: &proto::VerifyRequest,
    ) -> impl Future<Output = Result<proto::VerifyResponse, Self::Error>> + Send {
        self.as_ref().verify(request)
    }

    fn supported(
        &self,
    ) -> impl Future<Output = Result<proto::SupportedResponse, Self::Error>> + Send {
        self.as_ref().supported()
    }
}

/// A [`Verifier`] over locally configured chain providers.
pub struct VerifierLocal<P> {
    chains: ChainRegistry<P>,
}

impl<P> VerifierLocal<P> {
    pub fn new(chains: ChainRegistry<P>) -> Self {
        Self { chains }
    }
}

impl<P> Verifier for VerifierLocal<P>
where
    P: CallExecutor + ValidatorTargetSource + ChainProviderOps + Send + Sync,
{
    type Error = VerifierLocalError;

    async fn verify(
        &self,
        request: &proto::VerifyRequest,
    ) -> Result<proto::VerifyResponse, Self::Error> {
        let chain_id = request.chain_id();
        let provider = self
            .chains
            .by_chain_id(&chain_id)
            .ok_or(VerifierLocalError::UnsupportedNetwork(chain_id))?;
        let hash = request.digest()?;
        let deployment =
            DeploymentParams::from_parts(request.factory, request.factory_data.clone())?;
        let verify_request =
            VerifyHashRequest::new(request.address.into(), hash, request.signature.clone())
                .with_deployment(deployment)
                .at_block(request.block.unwrap_or_default());
        let target = provider.validator_target();
        let is_valid = verify_hash(provider, &target, &verify_request).await?;
        Ok(proto::VerifyResponse { is_valid })
    }

    async fn supported(&self) -> Result<proto::SupportedResponse, Self::Error> {
        let mut networks = self
            .chains
            .providers()
            .map(|provider| {
                let network = provider.chain_id();
                proto::SupportedNetwork {
                    name: network_name_by_chain_id(&network).map(str::to_string),
                    validator: provider.verification_strategy(),
                    network,
                }
            })
            .collect::<Vec<_>>();
        networks.sort_by(|a, b| a.network.to_string().cmp(&b.network.to_string()));
        Ok(proto::SupportedResponse { networks })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VerifierLocalError {
    #[error("Unsupported network {0}")]
    UnsupportedNetwork(ChainId),
    #[error(transparent)]
    InvalidSubject(#[from] SubjectError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// The node could not be asked; says nothing about the signature.
    #[error("Verification call failed: {0}")]
    Infrastructure(CallExecutionError),
}

impl From<VerifyHashError> for VerifierLocalError {
    fn from(value: VerifyHashError) -> Self {
        match value {
            VerifyHashError::Encoding(e) => VerifierLocalError::Encoding(e),
            VerifyHashError::Call(e) => VerifierLocalError::Infrastructure(e),
        }
    }
}
