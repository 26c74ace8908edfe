//! CAIP-2 chain identifier types.
//!
//! This module implements the [CAIP-2](https://standards.chainagnostic.org/CAIPs/caip-2) standard
//! for identifying blockchain networks. A CAIP-2 chain ID consists of two parts separated by a colon:
//!
//! - **Namespace**: The blockchain ecosystem (e.g., `eip155` for EVM)
//! - **Reference**: The chain-specific identifier (e.g., `8453` for Base, `137` for Polygon)
//!
//! # Examples
//!
//! ```
//! use x402_sigverify_types::chain::ChainId;
//!
//! let base = ChainId::new("eip155", "8453");
//! assert_eq!(base.to_string(), "eip155:8453");
//!
//! let polygon: ChainId = "eip155:137".parse().unwrap();
//! assert_eq!(polygon.namespace, "eip155");
//! assert_eq!(polygon.reference, "137");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

use crate::networks;

/// A CAIP-2 compliant blockchain identifier.
///
/// Serializes to/from a colon-separated string: `"eip155:8453"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainId {
    /// The blockchain namespace (e.g., `eip155` for EVM chains).
    pub namespace: String,
    /// The chain-specific reference (e.g., `8453` for Base, `137` for Polygon).
    pub reference: String,
}

impl ChainId {
    /// Creates a new chain ID from namespace and reference components.
    pub fn new<N: Into<String>, R: Into<String>>(namespace: N, reference: R) -> Self {
        Self {
            namespace: namespace.into(),
            reference: reference.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Creates a chain ID from a well-known network name.
    ///
    /// ```
    /// use x402_sigverify_types::chain::ChainId;
    ///
    /// let base = ChainId::from_network_name("base").unwrap();
    /// assert_eq!(base.to_string(), "eip155:8453");
    /// assert!(ChainId::from_network_name("unknown").is_none());
    /// ```
    pub fn from_network_name(network_name: &str) -> Option<Self> {
        networks::chain_id_by_network_name(network_name).cloned()
    }

    /// Returns the well-known network name for this chain ID, if any.
    pub fn as_network_name(&self) -> Option<&'static str> {
        networks::network_name_by_chain_id(self)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.reference)
    }
}

impl From<ChainId> for String {
    fn from(value: ChainId) -> Self {
        value.to_string()
    }
}

/// Error returned when parsing an invalid chain ID string.
///
/// A valid chain ID must be in the format `namespace:reference` where both
/// components are non-empty strings.
#[derive(Debug, thiserror::Error)]
#[error("Invalid chain id format {0}")]
pub struct ChainIdFormatError(String);

impl FromStr for ChainId {
    type Err = ChainIdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, reference) = s.split_once(':').ok_or(ChainIdFormatError(s.into()))?;
        if namespace.is_empty() || reference.is_empty() {
            return Err(ChainIdFormatError(s.into()));
        }
        Ok(ChainId::new(namespace, reference))
    }
}

impl Serialize for ChainId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ChainId::from_str(&s).map_err(de::Error::custom)
    }
}

/// A chain reference as accepted on the wire: either a CAIP-2 id or a known network name.
///
/// `"eip155:8453"` and `"base"` resolve to the same [`ChainId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRef(pub ChainId);

impl FromStr for NetworkRef {
    type Err = ChainIdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') {
            ChainId::from_str(s).map(NetworkRef)
        } else {
            ChainId::from_network_name(s)
                .map(NetworkRef)
                .ok_or(ChainIdFormatError(s.into()))
        }
    }
}

impl Serialize for NetworkRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NetworkRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NetworkRef::from_str(&s).map_err(de::Error::custom)
    }
}

impl From<NetworkRef> for ChainId {
    fn from(value: NetworkRef) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_serialize_eip155() {
        let chain_id = ChainId::new("eip155", "1");
        let serialized = serde_json::to_string(&chain_id).unwrap();
        assert_eq!(serialized, "\"eip155:1\"");
    }

    #[test]
    fn test_chain_id_deserialize_eip155() {
        let chain_id: ChainId = serde_json::from_str("\"eip155:1\"").unwrap();
        assert_eq!(chain_id.namespace, "eip155");
        assert_eq!(chain_id.reference, "1");
    }

    #[test]
    fn test_chain_id_deserialize_invalid_format() {
        let result: Result<ChainId, _> = serde_json::from_str("\"invalid\"");
        assert!(result.is_err());
        let result: Result<ChainId, _> = serde_json::from_str("\"eip155:\"");
        assert!(result.is_err());
        let result: Result<ChainId, _> = serde_json::from_str("\":8453\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_chain_id_deserialize_unknown_namespace() {
        let result: Result<ChainId, _> = serde_json::from_str("\"unknown:1\"");
        assert!(result.is_ok());
    }

    #[test]
    fn test_chain_id_as_network_name() {
        let chain_id = ChainId::new("eip155", "8453");
        assert_eq!(chain_id.as_network_name(), Some("base"));

        let unknown_chain_id = ChainId::new("eip155", "999999");
        assert!(unknown_chain_id.as_network_name().is_none());
    }

    #[test]
    fn test_network_ref_accepts_name_and_caip2() {
        let by_name: NetworkRef = serde_json::from_str("\"base-sepolia\"").unwrap();
        let by_id: NetworkRef = serde_json::from_str("\"eip155:84532\"").unwrap();
        assert_eq!(by_name, by_id);
        assert_eq!(ChainId::from(by_name).to_string(), "eip155:84532");
    }

    #[test]
    fn test_network_ref_rejects_unknown_name() {
        let result: Result<NetworkRef, _> = serde_json::from_str("\"not-a-network\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_network_ref_keeps_unknown_caip2() {
        let network: NetworkRef = serde_json::from_str("\"eip155:31337\"").unwrap();
        assert_eq!(network.0, ChainId::new("eip155", "31337"));
    }
}
