//! Decoding of the validator's boolean answer.
//!
//! The deployless validator returns a single byte, `isValidSig` returns an ABI `bool`
//! padded to 32 bytes. Both are accepted, as is any other zero-padded form: once leading
//! zero bytes are stripped, nothing (`false`) or a single `0x01` (`true`) must remain.
//! An empty payload is read as `false`.

use alloy_primitives::Bytes;

use crate::verify::EncodingError;

pub fn decode_validation_result(data: &[u8]) -> Result<bool, EncodingError> {
    let first_set = data.iter().position(|b| *b != 0).unwrap_or(data.len());
    match &data[first_set..] {
        [] => Ok(false),
        [1] => Ok(true),
        _ => Err(EncodingError::InvalidBoolean(Bytes::copy_from_slice(data))),
    }
}
