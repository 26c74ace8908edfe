//! EVM addressing: checksummed addresses and numeric chain references.

use alloy_primitives::{Address, hex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use x402_sigverify_types::chain::ChainId;

/// An Ethereum address that serializes with EIP-55 checksum encoding.
///
/// Parsing accepts any case; comparison is on the 20 bytes.
///
/// ```
/// use x402_sigverify_eip155::chain::ChecksummedAddress;
///
/// let addr: ChecksummedAddress = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045".parse().unwrap();
/// assert_eq!(addr.to_string(), "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ChecksummedAddress(pub Address);

impl FromStr for ChecksummedAddress {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address = Address::from_str(s)?;
        Ok(Self(address))
    }
}

impl Display for ChecksummedAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_checksum(None))
    }
}

impl Serialize for ChecksummedAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_checksum(None))
    }
}

impl<'de> Deserialize<'de> for ChecksummedAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<ChecksummedAddress> for Address {
    fn from(value: ChecksummedAddress) -> Self {
        value.0
    }
}

impl From<Address> for ChecksummedAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl PartialEq<ChecksummedAddress> for Address {
    fn eq(&self, other: &ChecksummedAddress) -> bool {
        self.eq(&other.0)
    }
}

/// The CAIP-2 namespace for EVM-compatible chains.
pub const EIP155_NAMESPACE: &str = "eip155";

/// A numeric chain ID for EVM-compatible networks.
///
/// ```
/// use x402_sigverify_eip155::chain::Eip155ChainReference;
/// use x402_sigverify_types::chain::ChainId;
///
/// let base = Eip155ChainReference::new(8453);
/// let chain_id: ChainId = base.into();
/// assert_eq!(chain_id.to_string(), "eip155:8453");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Eip155ChainReference(u64);

impl Eip155ChainReference {
    pub fn new(chain_id: u64) -> Self {
        Self(chain_id)
    }

    /// Returns the numeric chain ID.
    pub fn inner(&self) -> u64 {
        self.0
    }

    pub fn as_chain_id(&self) -> ChainId {
        ChainId::new(EIP155_NAMESPACE, self.0.to_string())
    }
}

impl From<Eip155ChainReference> for ChainId {
    fn from(value: Eip155ChainReference) -> Self {
        value.as_chain_id()
    }
}

impl From<&Eip155ChainReference> for ChainId {
    fn from(value: &Eip155ChainReference) -> Self {
        value.as_chain_id()
    }
}

impl TryFrom<&ChainId> for Eip155ChainReference {
    type Error = Eip155ChainReferenceFormatError;

    fn try_from(value: &ChainId) -> Result<Self, Self::Error> {
        if value.namespace != EIP155_NAMESPACE {
            return Err(Eip155ChainReferenceFormatError::InvalidNamespace(
                value.namespace.clone(),
            ));
        }
        let chain_id: u64 = value.reference.parse().map_err(|_| {
            Eip155ChainReferenceFormatError::InvalidReference(value.reference.clone())
        })?;
        Ok(Eip155ChainReference(chain_id))
    }
}

impl TryFrom<ChainId> for Eip155ChainReference {
    type Error = Eip155ChainReferenceFormatError;

    fn try_from(value: ChainId) -> Result<Self, Self::Error> {
        Eip155ChainReference::try_from(&value)
    }
}

/// Error returned when converting a [`ChainId`] to an [`Eip155ChainReference`].
#[derive(Debug, thiserror::Error)]
pub enum Eip155ChainReferenceFormatError {
    #[error("Invalid namespace {0}, expected eip155")]
    InvalidNamespace(String),
    #[error("Invalid eip155 chain reference {0}")]
    InvalidReference(String),
}

impl Display for Eip155ChainReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_checksummed_address_case_insensitive() {
        let lower: ChecksummedAddress = "0xdacd51a54883eb67d95faeb2bbfdc4a9a6bd2a3b".parse().unwrap();
        let upper: ChecksummedAddress = "0xDACD51A54883EB67D95FAEB2BBFDC4A9A6BD2A3B".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(
            lower.0,
            address!("0xdAcD51A54883eb67D95FAEb2BBfdC4a9a6BD2a3B")
        );
        let json = serde_json::to_string(&lower).unwrap();
        assert_eq!(json, "\"0xdAcD51A54883eb67D95FAEb2BBfdC4a9a6BD2a3B\"");
    }

    #[test]
    fn test_chain_reference_from_chain_id() {
        let chain_id = ChainId::new("eip155", "84532");
        let reference = Eip155ChainReference::try_from(&chain_id).unwrap();
        assert_eq!(reference.inner(), 84532);
        assert_eq!(ChainId::from(reference), chain_id);
    }

    #[test]
    fn test_chain_reference_rejects_other_namespaces() {
        let solana = ChainId::new("solana", "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp");
        assert!(matches!(
            Eip155ChainReference::try_from(solana),
            Err(Eip155ChainReferenceFormatError::InvalidNamespace(_))
        ));
        let bad = ChainId::new("eip155", "base");
        assert!(matches!(
            Eip155ChainReference::try_from(bad),
            Err(Eip155ChainReferenceFormatError::InvalidReference(_))
        ));
    }
}
