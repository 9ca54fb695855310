//! Error types for backpack-core

use thiserror::Error;

/// Failure to turn bytes back into a [`backpack_types::PlayerRecord`].
///
/// Encoding a well-formed record never fails; every variant here comes from
/// decoding.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("malformed protobuf: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("missing required block: {0}")]
    MissingField(&'static str),

    #[error("unknown {field} value: {value}")]
    UnknownEnumValue { field: &'static str, value: i32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("{which} secret must be at least {required} bytes, got {actual}")]
    SecretTooShort {
        which: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("ciphertext is not valid hex: {0}")]
    InvalidHex(String),

    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    InvalidLength(usize),

    #[error("invalid padding after decryption")]
    InvalidPadding,
}
