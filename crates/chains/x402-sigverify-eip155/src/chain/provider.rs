use alloy_primitives::Bytes;
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types_eth::BlockId;
use alloy_transport::layers::{FallbackLayer, ThrottleLayer};
use alloy_transport_http::Http;
use std::future::IntoFuture;
use std::num::NonZeroUsize;
use tower::ServiceBuilder;
use x402_sigverify_types::chain::{ChainId, ChainProviderOps, FromConfig};
use x402_sigverify_types::config::RpcConfig;

#[cfg(feature = "telemetry")]
use tracing::Instrument;

use crate::UniversalValidator;
use crate::chain::config::Eip155ChainConfig;
use crate::chain::types::Eip155ChainReference;
use crate::verify::{
    CallExecutionError, CallExecutor, CallPayload, ValidatorTarget, ValidatorTargetSource,
};

#[derive(Debug, thiserror::Error)]
pub enum Eip155ProviderError {
    #[error("No HTTP(S) RPC endpoint configured for {0}")]
    NoHttpTransport(ChainId),
}

/// Read-only access to an EVM chain for signature verification.
///
/// Wraps a [`RootProvider`] over one or more HTTP endpoints (each rate limited, combined
/// with a fallback layer) and the chain's [`ValidatorTarget`].
#[derive(Debug, Clone)]
pub struct Eip155ChainProvider {
    chain: Eip155ChainReference,
    validator: ValidatorTarget,
    inner: RootProvider,
}

impl Eip155ChainProvider {
    pub fn new(chain: Eip155ChainReference, validator: ValidatorTarget, inner: RootProvider) -> Self {
        Self {
            chain,
            validator,
            inner,
        }
    }

    pub fn rpc_client(chain_id: ChainId, rpc: &[RpcConfig]) -> Result<RpcClient, Eip155ProviderError> {
        let transports = rpc
            .iter()
            .filter_map(|provider_config| {
                let scheme = provider_config.http.scheme();
                let is_http = scheme == "http" || scheme == "https";
                if !is_http {
                    return None;
                }
                let rpc_url = provider_config.http.inner().clone();
                #[cfg(feature = "telemetry")]
                tracing::info!(chain=%chain_id, rpc_url=%rpc_url, rate_limit=?provider_config.rate_limit, "Using HTTP transport");
                let rate_limit = provider_config
                    .rate_limit
                    .filter(|limit| *limit > 0)
                    .unwrap_or(u32::MAX);
                let service = ServiceBuilder::new()
                    .layer(ThrottleLayer::new(rate_limit))
                    .service(Http::new(rpc_url));
                Some(service)
            })
            .collect::<Vec<_>>();
        let active_transport_count = NonZeroUsize::new(transports.len())
            .ok_or_else(|| Eip155ProviderError::NoHttpTransport(chain_id.clone()))?;
        let fallback = ServiceBuilder::new()
            .layer(FallbackLayer::default().with_active_transport_count(active_transport_count))
            .service(transports);
        Ok(RpcClient::new(fallback, false))
    }

    pub fn chain(&self) -> Eip155ChainReference {
        self.chain
    }
}

/// Creates a new provider from configuration.
///
/// # Errors
///
/// Returns an error if no HTTP(S) RPC endpoint is configured.
///
/// The validator comes from config when set, otherwise from [`UniversalValidator::on`]:
/// the well-known deployment, or deployless validation with the built-in bytecode.
#[async_trait::async_trait]
impl FromConfig<Eip155ChainConfig> for Eip155ChainProvider {
    async fn from_config(config: &Eip155ChainConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let validator = config
            .validator()
            .map(ValidatorTarget::from)
            .unwrap_or_else(|| UniversalValidator::on(config.chain_reference()));
        let client = Self::rpc_client(config.chain_id(), config.rpc())?;
        let inner = RootProvider::new(client);

        #[cfg(feature = "telemetry")]
        tracing::info!(chain=%config.chain_id(), validator=%validator, "Using EVM provider");

        Ok(Self::new(config.chain_reference(), validator, inner))
    }
}

impl CallExecutor for Eip155ChainProvider {
    async fn call(&self, payload: CallPayload, block: BlockId) -> Result<Bytes, CallExecutionError> {
        #[cfg(feature = "telemetry")]
        let creation = payload.is_creation();
        let call_fut = self.inner.call(payload.into()).block(block).into_future();
        #[cfg(feature = "telemetry")]
        let output = call_fut
            .instrument(tracing::info_span!(
                "eth_call",
                chain = %self.chain,
                block = %block,
                creation,
                otel.kind = "client"
            ))
            .await?;
        #[cfg(not(feature = "telemetry"))]
        let output = call_fut.await?;
        Ok(output)
    }
}

impl ValidatorTargetSource for Eip155ChainProvider {
    fn validator_target(&self) -> ValidatorTarget {
        self.validator.clone()
    }
}

impl ChainProviderOps for Eip155ChainProvider {
    fn chain_id(&self) -> ChainId {
        self.chain.into()
    }

    fn verification_strategy(&self) -> String {
        self.validator.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Eip155ChainConfigInner;
    use crate::verify::DeploylessBytecode;
    use alloy_primitives::bytes;

    fn chain_config(json: &str, chain: u64) -> Eip155ChainConfig {
        Eip155ChainConfig {
            chain_reference: Eip155ChainReference::new(chain),
            inner: serde_json::from_str::<Eip155ChainConfigInner>(json).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_from_config_uses_known_validator() {
        let config = chain_config(r#"{ "rpc": [{ "http": "http://127.0.0.1:8545" }] }"#, 84532);
        let provider = Eip155ChainProvider::from_config(&config).await.unwrap();
        assert_eq!(
            provider.validator_target(),
            ValidatorTarget::deployed(crate::verify::VALIDATOR_ADDRESS)
        );
        assert_eq!(provider.chain_id(), ChainId::new("eip155", "84532"));
    }

    #[tokio::test]
    async fn test_from_config_falls_back_to_deployless() {
        for chain in [1, 31337] {
            let config = chain_config(r#"{ "rpc": [{ "http": "http://127.0.0.1:8545" }] }"#, chain);
            let provider = Eip155ChainProvider::from_config(&config).await.unwrap();
            assert_eq!(provider.validator_target(), ValidatorTarget::default());
            assert_eq!(provider.verification_strategy(), "deployless");
        }
    }

    #[tokio::test]
    async fn test_from_config_validator_override() {
        let config = chain_config(
            r#"{ "rpc": [{ "http": "http://127.0.0.1:8545" }], "validator": { "bytecode": "0x60806040" } }"#,
            84532,
        );
        let provider = Eip155ChainProvider::from_config(&config).await.unwrap();
        assert_eq!(
            provider.validator_target(),
            ValidatorTarget::deployless(DeploylessBytecode::new(bytes!("60806040")))
        );
    }

    #[test]
    fn test_rpc_client_requires_http_transport() {
        let rpc: Vec<RpcConfig> =
            serde_json::from_str(r#"[{ "http": "wss://rpc.example.org" }]"#).unwrap();
        let result = Eip155ChainProvider::rpc_client(ChainId::new("eip155", "1"), &rpc);
        assert!(matches!(result, Err(Eip155ProviderError::NoHttpTransport(_))));
    }
}
