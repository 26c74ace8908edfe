use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use x402_sigverify_types::chain::ChainId;
use x402_sigverify_types::config::{LiteralOrEnv, RpcConfig};

use crate::chain::Eip155ChainReference;
use crate::verify::{DeploylessBytecode, ValidatorTarget};

#[derive(Debug, Clone)]
pub struct Eip155ChainConfig {
    pub chain_reference: Eip155ChainReference,
    pub inner: Eip155ChainConfigInner,
}

impl Eip155ChainConfig {
    pub fn chain_id(&self) -> ChainId {
        self.chain_reference.into()
    }
    pub fn rpc(&self) -> &Vec<RpcConfig> {
        &self.inner.rpc
    }
    pub fn validator(&self) -> Option<&ValidatorConfig> {
        self.inner.validator.as_ref()
    }
    pub fn chain_reference(&self) -> Eip155ChainReference {
        self.chain_reference
    }
}

/// Configuration specific to EVM-compatible chains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eip155ChainConfigInner {
    /// RPC provider configuration for this chain (required).
    pub rpc: Vec<RpcConfig>,
    /// Universal validator override. When absent, the well-known deployment is used, or
    /// the built-in deployless bytecode on networks without one.
    #[serde(default)]
    pub validator: Option<ValidatorConfig>,
}

/// Where to find the universal signature validator on a chain.
///
/// Either the address of a deployed validator:
///
/// ```json
/// { "validator": "0xdAcD51A54883eb67D95FAEb2BBfdC4a9a6BD2a3B" }
/// ```
///
/// or deployless validation. An empty object selects the built-in bytecode; `bytecode`
/// replaces it, literal or from the environment:
///
/// ```json
/// { "validator": {} }
/// { "validator": { "bytecode": "$VALIDATE_SIG_OFFCHAIN_BYTECODE" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidatorConfig {
    Deployed(Address),
    Deployless {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bytecode: Option<LiteralOrEnv<DeploylessBytecode>>,
    },
}

impl From<&ValidatorConfig> for ValidatorTarget {
    fn from(value: &ValidatorConfig) -> Self {
        match value {
            ValidatorConfig::Deployed(address) => ValidatorTarget::deployed(*address),
            ValidatorConfig::Deployless { bytecode: None } => ValidatorTarget::default(),
            ValidatorConfig::Deployless {
                bytecode: Some(bytecode),
            } => ValidatorTarget::deployless(bytecode.inner().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, bytes};

    #[test]
    fn test_validator_address() {
        let json = r#"{
            "rpc": [{ "http": "https://mainnet.base.org" }],
            "validator": "0xdAcD51A54883eb67D95FAEb2BBfdC4a9a6BD2a3B"
        }"#;
        let inner: Eip155ChainConfigInner = serde_json::from_str(json).unwrap();
        let target = ValidatorTarget::from(inner.validator.as_ref().unwrap());
        assert_eq!(
            target,
            ValidatorTarget::deployed(address!("0xdAcD51A54883eb67D95FAEb2BBfdC4a9a6BD2a3B"))
        );
    }

    #[test]
    fn test_validator_bytecode() {
        let json = r#"{
            "rpc": [{ "http": "https://rpc.example.org", "rate_limit": 10 }],
            "validator": { "bytecode": "0x6080604052" }
        }"#;
        let inner: Eip155ChainConfigInner = serde_json::from_str(json).unwrap();
        assert_eq!(inner.rpc[0].rate_limit, Some(10));
        let target = ValidatorTarget::from(inner.validator.as_ref().unwrap());
        assert_eq!(
            target,
            ValidatorTarget::deployless(DeploylessBytecode::new(bytes!("6080604052")))
        );
    }

    #[test]
    fn test_validator_builtin_deployless() {
        let json = r#"{ "rpc": [{ "http": "https://mainnet.base.org" }], "validator": {} }"#;
        let inner: Eip155ChainConfigInner = serde_json::from_str(json).unwrap();
        let target = ValidatorTarget::from(inner.validator.as_ref().unwrap());
        assert_eq!(target, ValidatorTarget::deployless(DeploylessBytecode::BUILTIN));
    }

    #[test]
    fn test_validator_omitted() {
        let json = r#"{ "rpc": [{ "http": "https://rpc.example.org" }] }"#;
        let inner: Eip155ChainConfigInner = serde_json::from_str(json).unwrap();
        assert!(inner.validator.is_none());
    }

    #[test]
    fn test_validator_rejects_garbage() {
        let json = r#"{ "rpc": [], "validator": "not-an-address" }"#;
        assert!(serde_json::from_str::<Eip155ChainConfigInner>(json).is_err());
    }
}
