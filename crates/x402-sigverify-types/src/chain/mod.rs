//! Blockchain identifiers and provider abstractions.
//!
//! The module is organized around chain providers and chain identifiers:
//!
//! - [`ChainId`] - A CAIP-2 compliant chain identifier (e.g., `eip155:8453` for Base)
//! - [`FromConfig`] - Async construction of providers from their configuration
//! - [`ChainRegistry`] - Registry of configured chain providers

mod chain_id;

pub use chain_id::*;

use std::collections::HashMap;
use std::sync::Arc;

/// Asynchronously constructs an instance of `Self` from a configuration type.
///
/// Used to build chain providers and the registry from configuration files.
///
/// Return an error if:
/// - Configuration validation fails
/// - Required external connections (RPC, etc.) cannot be established
/// - Configuration values are invalid or missing
#[async_trait::async_trait]
pub trait FromConfig<TConfig>
where
    Self: Sized,
{
    async fn from_config(config: &TConfig) -> Result<Self, Box<dyn std::error::Error>>;
}

/// Common operations available on all chain providers.
pub trait ChainProviderOps {
    /// Returns the CAIP-2 chain identifier for this provider.
    fn chain_id(&self) -> ChainId;

    /// Short human-readable description of how signatures are checked on this chain.
    fn verification_strategy(&self) -> String;
}

impl<T: ChainProviderOps> ChainProviderOps for Arc<T> {
    fn chain_id(&self) -> ChainId {
        (**self).chain_id()
    }
    fn verification_strategy(&self) -> String {
        (**self).verification_strategy()
    }
}

/// Registry of configured chain providers indexed by chain ID.
///
/// # Example
///
/// ```ignore
/// let registry = ChainRegistry::from_config(config.chains()).await?;
/// let base_provider = registry.by_chain_id(&ChainId::new("eip155", "8453"));
/// ```
#[derive(Debug)]
pub struct ChainRegistry<P>(HashMap<ChainId, P>);

impl<P> ChainRegistry<P> {
    pub fn new(providers: HashMap<ChainId, P>) -> Self {
        Self(providers)
    }

    /// Looks up a provider by exact chain ID.
    ///
    /// Returns `None` if no provider is configured for the given chain.
    pub fn by_chain_id(&self, chain_id: &ChainId) -> Option<&P> {
        self.0.get(chain_id)
    }

    /// Iterates over all configured providers, in no particular order.
    pub fn providers(&self) -> impl Iterator<Item = &P> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: ChainProviderOps> FromIterator<P> for ChainRegistry<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let providers = iter
            .into_iter()
            .map(|provider| (provider.chain_id(), provider))
            .collect();
        Self(providers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticProvider(&'static str);

    impl ChainProviderOps for StaticProvider {
        fn chain_id(&self) -> ChainId {
            ChainId::new("eip155", self.0)
        }
        fn verification_strategy(&self) -> String {
            "static".to_string()
        }
    }

    #[test]
    fn test_registry_lookup_by_chain_id() {
        let registry: ChainRegistry<StaticProvider> =
            [StaticProvider("8453"), StaticProvider("137")].into_iter().collect();
        assert_eq!(registry.len(), 2);
        let base = registry.by_chain_id(&ChainId::new("eip155", "8453"));
        assert_eq!(base.map(|p| p.0), Some("8453"));
        assert!(registry.by_chain_id(&ChainId::new("eip155", "1")).is_none());
        assert!(registry.by_chain_id(&ChainId::new("solana", "8453")).is_none());
    }

    #[test]
    fn test_registry_arc_provider_ops() {
        let provider = Arc::new(StaticProvider("42220"));
        assert_eq!(provider.chain_id().to_string(), "eip155:42220");
        assert_eq!(provider.verification_strategy(), "static");
    }
}
