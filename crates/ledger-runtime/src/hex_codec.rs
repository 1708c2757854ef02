//! Fixed-width hex decoding for addresses and hashes.
//!
//! Accepts an optional `0x` prefix. Used by the environment loader and by
//! the serde representation of replay commands.

use thiserror::Error;

/// Hex decoding failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HexError {
    /// Not valid hex.
    #[error("invalid hex: {0}")]
    Invalid(#[from] hex::FromHexError),

    /// Decoded to the wrong number of bytes.
    #[error("expected {expected} bytes, got {actual}")]
    Length {
        /// Required width
        expected: usize,
        /// Decoded width
        actual: usize,
    },
}

/// Decode `value` into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(value: &str) -> Result<[u8; N], HexError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| HexError::Length { expected: N, actual })
}

/// `#[serde(with = "hex_codec::serde_fixed")]` for `[u8; N]` fields.
pub mod serde_fixed {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `0x`-prefixed lowercase hex.
    pub fn serialize<S: Serializer, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    /// Deserialize from hex, with or without `0x`.
    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let value = String::deserialize(deserializer)?;
        super::decode_fixed(&value).map_err(D::Error::custom)
    }
}
