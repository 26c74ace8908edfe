//! Chain providers built from configuration.

use std::collections::HashMap;
use std::sync::Arc;
use x402_sigverify_eip155::chain::Eip155ChainProvider;
use x402_sigverify_types::chain::{ChainProviderOps, ChainRegistry, FromConfig};

use crate::config::{ChainConfig, ChainsConfig};

/// Provider for every configured chain.
pub type ChainProvider = Arc<Eip155ChainProvider>;

/// Creates a provider for every configured chain.
///
/// # Errors
///
/// Returns an error if any chain provider fails to initialize.
#[async_trait::async_trait]
impl FromConfig<ChainsConfig> for ChainRegistry<ChainProvider> {
    async fn from_config(chains: &ChainsConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut providers = HashMap::new();
        for chain in chains.iter() {
            let provider = match chain {
                ChainConfig::Eip155(config) => Eip155ChainProvider::from_config(config).await?,
            };
            providers.insert(provider.chain_id(), Arc::new(provider));
        }
        Ok(Self::new(providers))
    }
}
