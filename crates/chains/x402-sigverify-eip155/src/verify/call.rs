//! Payloads for the remote validation call.
//!
//! Two paths, chosen by the network's [`ValidatorTarget`]:
//! - a direct `isValidSig(address,bytes32,bytes)` call to a deployed universal validator;
//! - a creation-style ("deployless") call whose data is the `ValidateSigOffchain`
//!   creation bytecode followed by its ABI-encoded constructor arguments. The
//!   constructor runs the check and returns a single result byte.

use alloy_primitives::{Address, B256, Bytes, address, bytes};
use alloy_rpc_types_eth::{TransactionInput, TransactionRequest};
use alloy_sol_types::{SolCall, SolValue, sol};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Deterministic deployment address of the EIP-6492 universal signature validator.
pub const VALIDATOR_ADDRESS: Address = address!("0xdAcD51A54883eb67D95FAEb2BBfdC4a9a6BD2a3B");

sol! {
    interface IUniversalSigValidator {
        function isValidSig(address _signer, bytes32 _hash, bytes calldata _signature) external returns (bool);
    }
}

/// Creation bytecode of a `ValidateSigOffchain`-style validator.
///
/// Its constructor takes `(address _signer, bytes32 _hash, bytes _signature)` and returns
/// one byte, `0x01` when the signature is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploylessBytecode(Bytes);

impl DeploylessBytecode {
    /// Validator shipped with this crate, used whenever config does not override it.
    ///
    /// Source listing: `contracts/validate_sig_offchain.asm`. Behaves like the
    /// EIP-6492 `ValidateSigOffchain`: ERC-6492 factory deployment (and a one-off
    /// factory call retry for already deployed signers), ERC-1271 `isValidSignature`,
    /// then `ecrecover` for plain accounts. It reads its arguments from the bytes past
    /// its own length, so nothing may be appended to it except the arguments.
    pub const BUILTIN: DeploylessBytecode = DeploylessBytecode(bytes!(
        "6102de3803806102de6102003961020001602001610160526102005173ffffffffffffffffffffff"
        "ffffffffffffffffff1660005261022051602052610240516102000180516101a052602001610180"
        "526000513b604052610180516080526101a05160a05260206101a0511061011857610180516101a0"
        "510160209003517f6492649264926492649264926492649264926492649264926492649264926492"
        "1415610118576001606052610180515173ffffffffffffffffffffffffffffffffffffffff1660c0"
        "526101805180602001510180516101005260200160e05261018051806040015101805160a0526020"
        "0160805260405161011857600060006101005160e051600060c0515af11561026457600161012052"
        "5b606051604051171561026957610160517f1626ba7e000000000000000000000000000000000000"
        "00000000000000000000815260205181600401526040816024015260a051816044015260005b60a0"
        "518110156101845780608051015182820160640152602001610165565b5060008160a05101606401"
        "52600061014052602061014060a051601f017fffffffffffffffffffffffffffffffffffffffffff"
        "ffffffffffffffffffffe016606401836000515afa6101c052506101c051156102185760203d1061"
        "021157610140517f1626ba7e00000000000000000000000000000000000000000000000000000000"
        "1461025857610218565b60006101c0525b6101205115606051161561024857600060006101005160"
        "e051600060c0515af11561026457600161012052610118565b6101c0511561026457600061025b56"
        "5b60015b60005360016000f35b600080fd5b6101a051604114156102645761018051604001516000"
        "1a80601b1481601c1417156102645761016051602051815290816020015261018051518160400152"
        "61018051602001518160600152600061014052602061014060808360015afa156102645750610140"
        "5180600051149015151661025b56"
    ));

    pub fn new(bytecode: Bytes) -> Self {
        Self(bytecode)
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }
}

impl Default for DeploylessBytecode {
    fn default() -> Self {
        Self::BUILTIN
    }
}

impl FromStr for DeploylessBytecode {
    type Err = alloy_primitives::hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Bytes::from_str(s)?))
    }
}

/// Where the universal validator logic lives on a given network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorTarget {
    /// Validator contract deployed at a known address.
    Deployed(Address),
    /// No deployment known; the validator is simulated from its creation bytecode.
    Unknown(DeploylessBytecode),
}

impl Default for ValidatorTarget {
    /// Deployless validation with [`DeploylessBytecode::BUILTIN`].
    fn default() -> Self {
        ValidatorTarget::Unknown(DeploylessBytecode::BUILTIN)
    }
}

impl ValidatorTarget {
    pub fn deployed(address: Address) -> Self {
        ValidatorTarget::Deployed(address)
    }

    pub fn deployless(bytecode: DeploylessBytecode) -> Self {
        ValidatorTarget::Unknown(bytecode)
    }
}

impl Display for ValidatorTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidatorTarget::Deployed(address) => write!(f, "deployed:{address}"),
            ValidatorTarget::Unknown(_) => write!(f, "deployless"),
        }
    }
}

/// A read-only call: `to == None` marks a creation-style simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPayload {
    pub to: Option<Address>,
    pub data: Bytes,
}

impl CallPayload {
    pub fn is_creation(&self) -> bool {
        self.to.is_none()
    }
}

impl From<CallPayload> for TransactionRequest {
    fn from(payload: CallPayload) -> Self {
        let request = TransactionRequest::default().input(TransactionInput::new(payload.data));
        match payload.to {
            Some(to) => request.to(to),
            None => request,
        }
    }
}

/// Builds the call that asks the validator whether `signature` is valid for `signer` over `hash`.
///
/// `signature` is passed through as given: plain, or already wrapped per EIP-6492.
pub fn build_validation_call(
    target: &ValidatorTarget,
    signer: Address,
    hash: B256,
    signature: Bytes,
) -> CallPayload {
    match target {
        ValidatorTarget::Deployed(address) => {
            let call = IUniversalSigValidator::isValidSigCall {
                _signer: signer,
                _hash: hash,
                _signature: signature,
            };
            CallPayload {
                to: Some(*address),
                data: call.abi_encode().into(),
            }
        }
        ValidatorTarget::Unknown(bytecode) => {
            let args = (signer, hash, signature).abi_encode_params();
            let mut data = Vec::with_capacity(bytecode.as_bytes().len() + args.len());
            data.extend_from_slice(bytecode.as_bytes());
            data.extend_from_slice(&args);
            CallPayload {
                to: None,
                data: data.into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::ERC6492_MAGIC_SUFFIX;
    use alloy_primitives::TxKind;

    fn bytecode() -> DeploylessBytecode {
        DeploylessBytecode::new(bytes!("60806040526000"))
    }

    #[test]
    fn test_known_validator_call() {
        let signer = Address::repeat_byte(0x01);
        let hash = B256::repeat_byte(0x02);
        let signature = bytes!("aabbcc");
        let payload = build_validation_call(
            &ValidatorTarget::deployed(VALIDATOR_ADDRESS),
            signer,
            hash,
            signature.clone(),
        );
        assert_eq!(payload.to, Some(VALIDATOR_ADDRESS));
        assert_eq!(
            &payload.data[..4],
            IUniversalSigValidator::isValidSigCall::SELECTOR.as_slice()
        );
        let decoded = IUniversalSigValidator::isValidSigCall::abi_decode(&payload.data).unwrap();
        assert_eq!(decoded._signer, signer);
        assert_eq!(decoded._hash, hash);
        assert_eq!(decoded._signature, signature);
    }

    #[test]
    fn test_deployless_call() {
        let signer = Address::repeat_byte(0x01);
        let hash = B256::repeat_byte(0x02);
        let signature = bytes!("aabbcc");
        let payload = build_validation_call(
            &ValidatorTarget::deployless(bytecode()),
            signer,
            hash,
            signature.clone(),
        );
        assert!(payload.is_creation());
        let code = bytecode();
        let code = code.as_bytes();
        assert!(payload.data.starts_with(code));
        let args = &payload.data[code.len()..];
        let (s, h, sig) = <(Address, B256, Bytes)>::abi_decode_params(args).unwrap();
        assert_eq!((s, h, sig), (signer, hash, signature));
    }

    #[test]
    fn test_default_target_is_builtin_deployless() {
        let target = ValidatorTarget::default();
        assert_eq!(target, ValidatorTarget::deployless(DeploylessBytecode::BUILTIN));
        assert_eq!(target.to_string(), "deployless");
        assert_eq!(DeploylessBytecode::default(), DeploylessBytecode::BUILTIN);

        let payload = build_validation_call(
            &target,
            Address::repeat_byte(0x01),
            B256::repeat_byte(0x02),
            bytes!("aabbcc"),
        );
        assert!(payload.is_creation());
        let code = DeploylessBytecode::BUILTIN.as_bytes().len();
        let (signer, _, signature) =
            <(Address, B256, Bytes)>::abi_decode_params(&payload.data[code..]).unwrap();
        assert_eq!(signer, Address::repeat_byte(0x01));
        assert_eq!(signature, bytes!("aabbcc"));
    }

    #[test]
    fn test_builtin_bytecode_layout() {
        let code = DeploylessBytecode::BUILTIN;
        let code = code.as_bytes();
        // PUSH2 <own length>: constructor arguments are read from right after the code.
        assert_eq!(code[0], 0x61);
        assert_eq!(usize::from(u16::from_be_bytes([code[1], code[2]])), code.len());
        let contains = |needle: &[u8]| code.windows(needle.len()).any(|w| w == needle);
        assert!(contains(&ERC6492_MAGIC_SUFFIX));
        assert!(contains(&[0x7f, 0x16, 0x26, 0xba, 0x7e]));
    }

    #[test]
    fn test_into_transaction_request() {
        let call: TransactionRequest = CallPayload {
            to: None,
            data: bytes!("01"),
        }
        .into();
        assert_eq!(call.to, None);
        assert_eq!(call.input.input().cloned(), Some(bytes!("01")));

        let call: TransactionRequest = CallPayload {
            to: Some(VALIDATOR_ADDRESS),
            data: bytes!("02"),
        }
        .into();
        assert_eq!(call.to, Some(TxKind::Call(VALIDATOR_ADDRESS)));
    }

    #[test]
    fn test_bytecode_from_str() {
        let parsed: DeploylessBytecode = "0x60806040526000".parse().unwrap();
        assert_eq!(parsed, bytecode());
        assert!("0x6".parse::<DeploylessBytecode>().is_err());
    }
}
