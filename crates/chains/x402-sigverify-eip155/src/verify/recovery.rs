//! Local ECDSA recovery, used when the on-chain check reverts.

use alloy_primitives::{Address, B256, Signature, SignatureError};

#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("Signature must be 64 or 65 bytes, got {0}")]
    InvalidLength(usize),
    #[error("Unsupported recovery id {0}")]
    InvalidRecoveryId(u8),
    #[error(transparent)]
    Recovery(#[from] SignatureError),
}

/// Recovers the signer of a prehashed message.
///
/// Accepts the 65-byte `r ++ s ++ v` form (`v` in `0`/`1`/`27`/`28`) and the 64-byte
/// ERC-2098 compact form. High-s signatures are normalized before recovery.
pub fn recover_signer(hash: &B256, signature: &[u8]) -> Result<Address, RecoveryError> {
    let signature = match signature.len() {
        65 => {
            let v = signature[64];
            if !matches!(v, 0 | 1 | 27 | 28) {
                return Err(RecoveryError::InvalidRecoveryId(v));
            }
            Signature::from_raw(signature)?
        }
        64 => Signature::from_erc2098(signature),
        other => return Err(RecoveryError::InvalidLength(other)),
    };
    let signature = signature.normalized_s();
    Ok(signature.recover_address_from_prehash(hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;

    const HASH: B256 = b256!("0x5c0d6f8b44d2d7e6e3bb9c2b1f7c1c1d7bde2f1d3a2b3c4d5e6f708192a3b4c5");

    fn signer() -> PrivateKeySigner {
        PrivateKeySigner::from_bytes(&B256::repeat_byte(0x42)).unwrap()
    }

    #[test]
    fn test_recover_65_bytes() {
        let signer = signer();
        let signature = signer.sign_hash_sync(&HASH).unwrap();
        let recovered = recover_signer(&HASH, &signature.as_bytes()).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn test_recover_with_zero_one_parity() {
        let signer = signer();
        let mut raw = signer.sign_hash_sync(&HASH).unwrap().as_bytes();
        raw[64] -= 27;
        assert_eq!(recover_signer(&HASH, &raw).unwrap(), signer.address());
    }

    #[test]
    fn test_recover_erc2098() {
        let signer = signer();
        let signature = signer.sign_hash_sync(&HASH).unwrap();
        let compact = signature.as_erc2098();
        assert_eq!(recover_signer(&HASH, &compact).unwrap(), signer.address());
    }

    #[test]
    fn test_bad_length() {
        assert!(matches!(
            recover_signer(&HASH, &[0u8; 10]),
            Err(RecoveryError::InvalidLength(10))
        ));
    }

    #[test]
    fn test_bad_recovery_id() {
        let mut raw = signer().sign_hash_sync(&HASH).unwrap().as_bytes();
        raw[64] = 5;
        assert!(matches!(
            recover_signer(&HASH, &raw),
            Err(RecoveryError::InvalidRecoveryId(5))
        ));
    }
}
