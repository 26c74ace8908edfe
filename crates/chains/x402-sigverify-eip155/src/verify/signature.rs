//! Signature normalization and the ERC-6492 wrapper.
//!
//! A signature arrives in one of three shapes ([`SignatureInput`]) and is normalized to
//! canonical bytes before anything else happens. Counterfactual accounts carry their
//! deployment recipe inside the signature itself, following
//! [EIP-6492](https://eips.ethereum.org/EIPS/eip-6492):
//!
//! ```text
//! abi.encode(address factory, bytes factoryCalldata, bytes innerSig) ++ 0x6492…6492
//! ```

use alloy_primitives::{Address, Bytes, U256, hex};
use alloy_sol_types::{SolValue, sol};
use serde::{Deserialize, Serialize};

use crate::verify::EncodingError;

/// The fixed 32-byte magic suffix defined by EIP-6492.
///
/// Any signature ending with this constant is treated as a 6492-wrapped signature.
pub const ERC6492_MAGIC_SUFFIX: [u8; 32] =
    hex!("6492649264926492649264926492649264926492649264926492649264926492");

sol! {
    /// Matches the tuple `(address factory, bytes factoryCalldata, bytes innerSig)`.
    #[derive(Debug)]
    struct Sig6492 {
        address factory;
        bytes   factoryCalldata;
        bytes   innerSig;
    }
}

/// One logical signature in any of the accepted shapes.
///
/// On the wire: a hex string, an `{ r, s, v }` object (`yParity` accepted for `v`),
/// or an array of bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "SignatureInputRepr")]
pub enum SignatureInput {
    Hex(String),
    Parts(SignatureParts),
    Bytes(Bytes),
}

/// ECDSA signature split into scalars and recovery id.
///
/// Deserializes from `v`, `yParity` or both. `yParity` wins when both are present, and
/// they must agree on the parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SignaturePartsRepr")]
pub struct SignatureParts {
    pub r: U256,
    pub s: U256,
    /// `0`/`1` or the legacy `27`/`28`.
    pub v: u64,
}

#[derive(Deserialize)]
struct SignaturePartsRepr {
    r: U256,
    s: U256,
    #[serde(default)]
    v: Option<u64>,
    #[serde(default, rename = "yParity")]
    y_parity: Option<u64>,
}

/// Parity encoded by `v`: `0`/`27` even, `1`/`28` odd, `35 + 2 * chain_id + parity` per EIP-155.
fn v_parity(v: u64) -> Option<u64> {
    match v {
        0 | 27 => Some(0),
        1 | 28 => Some(1),
        35..=u64::MAX => Some((v - 35) % 2),
        _ => None,
    }
}

impl TryFrom<SignaturePartsRepr> for SignatureParts {
    type Error = EncodingError;

    fn try_from(value: SignaturePartsRepr) -> Result<Self, Self::Error> {
        let v = match (value.v, value.y_parity) {
            (None, None) => return Err(EncodingError::MissingRecoveryId),
            (Some(v), None) => v,
            (None, Some(y_parity)) => y_parity,
            (Some(v), Some(y_parity)) => {
                if v_parity(v).is_some_and(|parity| parity != y_parity) {
                    return Err(EncodingError::InconsistentParity { v, y_parity });
                }
                y_parity
            }
        };
        Ok(Self {
            r: value.r,
            s: value.s,
            v,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignatureInputRepr {
    Hex(String),
    Bytes(Vec<u8>),
    Parts(SignatureParts),
}

impl From<SignatureInputRepr> for SignatureInput {
    fn from(value: SignatureInputRepr) -> Self {
        match value {
            SignatureInputRepr::Hex(s) => SignatureInput::Hex(s),
            SignatureInputRepr::Parts(parts) => SignatureInput::Parts(parts),
            SignatureInputRepr::Bytes(bytes) => SignatureInput::Bytes(bytes.into()),
        }
    }
}

impl From<Bytes> for SignatureInput {
    fn from(value: Bytes) -> Self {
        SignatureInput::Bytes(value)
    }
}

impl From<SignatureParts> for SignatureInput {
    fn from(value: SignatureParts) -> Self {
        SignatureInput::Parts(value)
    }
}

impl From<alloy_primitives::Signature> for SignatureParts {
    fn from(value: alloy_primitives::Signature) -> Self {
        Self {
            r: value.r(),
            s: value.s(),
            v: value.v() as u64,
        }
    }
}

impl SignatureInput {
    /// Converts any accepted shape into canonical signature bytes.
    pub fn normalize(&self) -> Result<Bytes, EncodingError> {
        match self {
            SignatureInput::Hex(s) => Ok(hex::decode(s)?.into()),
            SignatureInput::Parts(parts) => Ok(Bytes::copy_from_slice(&parts.to_bytes()?)),
            SignatureInput::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

impl SignatureParts {
    /// `r (32 bytes BE) ++ s (32 bytes BE) ++ v`, with `v` in the 27/28 convention.
    pub fn to_bytes(&self) -> Result<[u8; 65], EncodingError> {
        let v: u8 = match self.v {
            0 | 27 => 27,
            1 | 28 => 28,
            other => return Err(EncodingError::InvalidRecoveryId(other)),
        };
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r.to_be_bytes::<32>());
        out[32..64].copy_from_slice(&self.s.to_be_bytes::<32>());
        out[64] = v;
        Ok(out)
    }
}

/// Whether the bytes end with the EIP-6492 magic suffix.
pub fn is_erc6492(signature: &[u8]) -> bool {
    signature.len() >= ERC6492_MAGIC_SUFFIX.len()
        && signature[signature.len() - ERC6492_MAGIC_SUFFIX.len()..] == ERC6492_MAGIC_SUFFIX
}

/// Decoded form of an EIP-6492 wrapped signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc6492Signature {
    /// Factory contract that can deploy the wallet deterministically.
    pub factory: Address,
    /// Calldata to invoke on the factory (often a CREATE2 deployment).
    pub factory_calldata: Bytes,
    /// Signature the wallet validates once deployed.
    pub inner: Bytes,
}

impl Erc6492Signature {
    pub fn new(factory: Address, factory_calldata: Bytes, inner: Bytes) -> Self {
        Self {
            factory,
            factory_calldata,
            inner,
        }
    }

    /// Returns `Ok(None)` when the bytes carry no magic suffix.
    pub fn decode(bytes: &[u8]) -> Result<Option<Self>, EncodingError> {
        if !is_erc6492(bytes) {
            return Ok(None);
        }
        let body = &bytes[..bytes.len() - ERC6492_MAGIC_SUFFIX.len()];
        let sig6492 = Sig6492::abi_decode_params(body).map_err(EncodingError::InvalidErc6492)?;
        Ok(Some(Self {
            factory: sig6492.factory,
            factory_calldata: sig6492.factoryCalldata,
            inner: sig6492.innerSig,
        }))
    }

    /// ABI-encodes the parts and appends the magic suffix.
    ///
    /// Must not be given an already wrapped inner signature; [`DeploymentParams::apply`]
    /// guards against that.
    pub fn encode(&self) -> Bytes {
        let sig6492 = Sig6492 {
            factory: self.factory,
            factoryCalldata: self.factory_calldata.clone(),
            innerSig: self.inner.clone(),
        };
        let mut out = sig6492.abi_encode_params();
        out.extend_from_slice(&ERC6492_MAGIC_SUFFIX);
        out.into()
    }
}

/// Deployment recipe of a counterfactual account: both parts or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeploymentParams {
    #[default]
    None,
    Explicit {
        factory: Address,
        factory_data: Bytes,
    },
}

impl DeploymentParams {
    pub fn explicit(factory: Address, factory_data: Bytes) -> Self {
        DeploymentParams::Explicit {
            factory,
            factory_data,
        }
    }

    /// Builds params from two optional halves, rejecting the half-present state.
    pub fn from_parts(
        factory: Option<Address>,
        factory_data: Option<Bytes>,
    ) -> Result<Self, EncodingError> {
        match (factory, factory_data) {
            (None, None) => Ok(DeploymentParams::None),
            (Some(factory), Some(factory_data)) => Ok(Self::explicit(factory, factory_data)),
            _ => Err(EncodingError::PartialDeployment),
        }
    }

    /// Wraps the signature unless there is nothing to wrap with or it is already wrapped.
    pub fn apply(&self, signature: Bytes) -> Bytes {
        match self {
            DeploymentParams::None => signature,
            DeploymentParams::Explicit { .. } if is_erc6492(&signature) => signature,
            DeploymentParams::Explicit {
                factory,
                factory_data,
            } => Erc6492Signature::new(*factory, factory_data.clone(), signature).encode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Signature, address, bytes};

    const R: &str = "0x840cfc572845f5786e702984c2a582528cad4b49b2a10b9db1be7fca90058565";
    const S: &str = "0x25e7109ceb98168d95b09b18bbf6b685130e0562f233877d492b94eee0c5b6d1";

    fn parts(v: u64) -> SignatureParts {
        SignatureParts {
            r: R.parse().unwrap(),
            s: S.parse().unwrap(),
            v,
        }
    }

    #[test]
    fn test_parts_normalize_matches_direct_serialization() {
        for (v, parity) in [(0u64, false), (1, true), (27, false), (28, true)] {
            let p = parts(v);
            let expected = Signature::new(p.r, p.s, parity).as_bytes();
            let normalized = SignatureInput::Parts(p).normalize().unwrap();
            assert_eq!(normalized.as_ref(), expected.as_slice());

            let as_hex = SignatureInput::Hex(hex::encode_prefixed(expected));
            assert_eq!(as_hex.normalize().unwrap(), normalized);
            let as_bytes = SignatureInput::Bytes(Bytes::copy_from_slice(&expected));
            assert_eq!(as_bytes.normalize().unwrap(), normalized);
        }
    }

    #[test]
    fn test_parts_reject_unknown_recovery_id() {
        let result = SignatureInput::Parts(parts(2)).normalize();
        assert!(matches!(result, Err(EncodingError::InvalidRecoveryId(2))));
        let result = SignatureInput::Parts(parts(37)).normalize();
        assert!(matches!(result, Err(EncodingError::InvalidRecoveryId(37))));
    }

    #[test]
    fn test_hex_without_prefix() {
        let with = SignatureInput::Hex("0xdeadbeef".into()).normalize().unwrap();
        let without = SignatureInput::Hex("DEADBEEF".into()).normalize().unwrap();
        assert_eq!(with, without);
        assert_eq!(with, bytes!("deadbeef"));
    }

    #[test]
    fn test_malformed_hex() {
        let odd = SignatureInput::Hex("0xabc".into()).normalize();
        assert!(matches!(odd, Err(EncodingError::InvalidHex(_))));
        let garbage = SignatureInput::Hex("0xzz".into()).normalize();
        assert!(matches!(garbage, Err(EncodingError::InvalidHex(_))));
    }

    #[test]
    fn test_deserialize_shapes() {
        let hex: SignatureInput = serde_json::from_str("\"0x0102\"").unwrap();
        assert_eq!(hex, SignatureInput::Hex("0x0102".into()));

        let raw: SignatureInput = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(raw, SignatureInput::Bytes(bytes!("0102")));

        let json = format!(r#"{{"r": "{R}", "s": "{S}", "yParity": 1}}"#);
        let structured: SignatureInput = serde_json::from_str(&json).unwrap();
        assert_eq!(structured, SignatureInput::Parts(parts(1)));
    }

    #[test]
    fn test_deserialize_v_and_y_parity() {
        let both: SignatureParts =
            serde_json::from_str(r#"{"r":"0x01","s":"0x02","v":27,"yParity":0}"#).unwrap();
        assert_eq!(both.v, 0);
        assert_eq!(both.r, U256::from(1));
        assert_eq!(both.s, U256::from(2));

        // EIP-155 v for chain 1: 37 carries parity 0.
        let eip155: SignatureParts =
            serde_json::from_str(r#"{"r":"0x01","s":"0x02","v":37,"yParity":0}"#).unwrap();
        assert_eq!(eip155.v, 0);

        let legacy: SignatureParts =
            serde_json::from_str(r#"{"r":"0x01","s":"0x02","v":28}"#).unwrap();
        assert_eq!(legacy.v, 28);

        let structured: SignatureInput =
            serde_json::from_str(r#"{"r":"0x01","s":"0x02","v":28,"yParity":1}"#).unwrap();
        assert!(matches!(structured, SignatureInput::Parts(SignatureParts { v: 1, .. })));
    }

    #[test]
    fn test_deserialize_rejects_disagreeing_parity() {
        let result =
            serde_json::from_str::<SignatureParts>(r#"{"r":"0x01","s":"0x02","v":27,"yParity":1}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<SignatureParts>(r#"{"r":"0x01","s":"0x02"}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<SignatureInput>(
            r#"{"r":"0x01","s":"0x02","v":0,"yParity":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_erc6492_wrap_then_decode() {
        let factory = address!("0x4e59b44847b379578588920cA78FbF26c0B4956C");
        let factory_data = bytes!("c0ffee");
        let inner = bytes!("01020304");
        let wrapped = DeploymentParams::explicit(factory, factory_data.clone()).apply(inner.clone());

        assert!(is_erc6492(&wrapped));
        assert_eq!(&wrapped[wrapped.len() - 32..], &ERC6492_MAGIC_SUFFIX);
        let decoded = Erc6492Signature::decode(&wrapped).unwrap().unwrap();
        assert_eq!(decoded, Erc6492Signature::new(factory, factory_data, inner));
    }

    #[test]
    fn test_wrap_is_not_repeated() {
        let first = DeploymentParams::explicit(Address::repeat_byte(0x11), bytes!("aa"));
        let second = DeploymentParams::explicit(Address::repeat_byte(0x22), bytes!("bbbb"));
        let wrapped = first.apply(bytes!("01"));
        assert_eq!(second.apply(wrapped.clone()), wrapped);
        assert_eq!(DeploymentParams::None.apply(wrapped.clone()), wrapped);
    }

    #[test]
    fn test_plain_signature_is_not_erc6492() {
        let plain = Bytes::copy_from_slice(&parts(27).to_bytes().unwrap());
        assert!(!is_erc6492(&plain));
        assert_eq!(Erc6492Signature::decode(&plain).unwrap(), None);
        assert!(!is_erc6492(&ERC6492_MAGIC_SUFFIX[1..]));
    }

    #[test]
    fn test_malformed_wrapper_body() {
        let mut garbage = vec![0xffu8; 40];
        garbage.extend_from_slice(&ERC6492_MAGIC_SUFFIX);
        let result = Erc6492Signature::decode(&garbage);
        assert!(matches!(result, Err(EncodingError::InvalidErc6492(_))));
    }

    #[test]
    fn test_deployment_params_from_parts() {
        let factory = Address::repeat_byte(0x33);
        assert_eq!(
            DeploymentParams::from_parts(None, None).unwrap(),
            DeploymentParams::None
        );
        assert_eq!(
            DeploymentParams::from_parts(Some(factory), Some(bytes!("01"))).unwrap(),
            DeploymentParams::explicit(factory, bytes!("01"))
        );
        assert!(matches!(
            DeploymentParams::from_parts(Some(factory), None),
            Err(EncodingError::PartialDeployment)
        ));
        assert!(matches!(
            DeploymentParams::from_parts(None, Some(bytes!("01"))),
            Err(EncodingError::PartialDeployment)
        ));
    }
}
