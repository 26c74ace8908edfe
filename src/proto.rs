//! Wire types of the HTTP API.
//!
//! All bodies are JSON with camelCase keys.

use alloy_primitives::{Address, B256, Bytes, eip191_hash_message};
use alloy_rpc_types_eth::BlockId;
use serde::{Deserialize, Serialize};
use x402_sigverify_eip155::chain::ChecksummedAddress;
use x402_sigverify_eip155::verify::SignatureInput;
use x402_sigverify_types::chain::{ChainId, NetworkRef};

/// Body of `POST /verify`.
///
/// Exactly one of `hash` and `message` must be present. A `message` is hashed per
/// EIP-191 before verification. `factory` and `factoryData` come together or not at all.
///
/// ```json
/// {
///   "network": "base",
///   "address": "0x...",
///   "hash": "0x...",
///   "signature": "0x...",
///   "factory": "0x...",
///   "factoryData": "0x...",
///   "block": "latest"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// CAIP-2 id (`eip155:8453`) or known network name (`base`).
    pub network: NetworkRef,
    pub address: ChecksummedAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub signature: SignatureInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    #[error("Either `hash` or `message` is required")]
    Missing,
    #[error("Only one of `hash` and `message` may be set")]
    Ambiguous,
}

impl VerifyRequest {
    pub fn chain_id(&self) -> ChainId {
        self.network.clone().into()
    }

    /// The 32-byte digest the signature is checked against.
    pub fn digest(&self) -> Result<B256, SubjectError> {
        match (&self.hash, &self.message) {
            (Some(hash), None) => Ok(*hash),
            (None, Some(message)) => Ok(eip191_hash_message(message)),
            (None, None) => Err(SubjectError::Missing),
            (Some(_), Some(_)) => Err(SubjectError::Ambiguous),
        }
    }
}

/// Body of a successful `POST /verify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub is_valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `GET /supported`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupportedResponse {
    pub networks: Vec<SupportedNetwork>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportedNetwork {
    pub network: ChainId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `deployed:<address>` or `deployless`.
    pub validator: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    const ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    #[test]
    fn test_parse_hash_request_with_network_name() {
        let json = format!(
            r#"{{
                "network": "base-sepolia",
                "address": "{ADDRESS}",
                "hash": "0x1111111111111111111111111111111111111111111111111111111111111111",
                "signature": "0xdeadbeef",
                "block": "latest"
            }}"#
        );
        let request: VerifyRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.chain_id(), ChainId::new("eip155", "84532"));
        assert_eq!(
            request.digest().unwrap(),
            b256!("0x1111111111111111111111111111111111111111111111111111111111111111")
        );
        assert_eq!(request.block, Some(BlockId::latest()));
        assert!(request.factory.is_none());
    }

    #[test]
    fn test_parse_message_request_with_deployment() {
        let json = format!(
            r#"{{
                "network": "eip155:8453",
                "address": "{ADDRESS}",
                "message": "hello",
                "signature": {{ "r": "0x01", "s": "0x02", "v": 27 }},
                "factory": "0x4e59b44847b379578588920cA78FbF26c0B4956C",
                "factoryData": "0xc0ffee"
            }}"#
        );
        let request: VerifyRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.digest().unwrap(), eip191_hash_message("hello"));
        assert!(matches!(request.signature, SignatureInput::Parts(_)));
        assert_eq!(request.factory_data, Some(Bytes::from_static(&[0xc0, 0xff, 0xee])));
    }

    #[test]
    fn test_subject_errors() {
        let json = format!(
            r#"{{ "network": "base", "address": "{ADDRESS}", "signature": "0x00" }}"#
        );
        let request: VerifyRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.digest(), Err(SubjectError::Missing));

        let json = format!(
            r#"{{ "network": "base", "address": "{ADDRESS}", "hash": "0x1111111111111111111111111111111111111111111111111111111111111111", "message": "x", "signature": "0x00" }}"#
        );
        let request: VerifyRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.digest(), Err(SubjectError::Ambiguous));
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_string(&VerifyResponse { is_valid: true }).unwrap();
        assert_eq!(json, r#"{"isValid":true}"#);
    }
}
