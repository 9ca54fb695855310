//! AES-128-CBC payload encryption with PKCS#7 padding and hex output.
//!
//! The IV is static: every payload encrypted with the same [`CipherKeys`]
//! shares it, so identical plaintexts produce identical ciphertexts.
//! Downstream decoders expect this, so it is kept as-is.

use std::fmt;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::CipherError;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

pub const BLOCK_SIZE: usize = 16;
pub const KEY_SIZE: usize = 16;

/// Key and IV for the payload cipher.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKeys {
    key: [u8; KEY_SIZE],
    iv: [u8; BLOCK_SIZE],
}

impl CipherKeys {
    pub fn new(key: [u8; KEY_SIZE], iv: [u8; BLOCK_SIZE]) -> Self {
        Self { key, iv }
    }

    /// Take the first 16 bytes of each secret. Shorter secrets are rejected
    /// instead of being used with fewer bytes.
    pub fn from_secrets(key: &str, iv: &str) -> Result<Self, CipherError> {
        Ok(Self {
            key: leading_bytes("key", key.as_bytes())?,
            iv: leading_bytes("iv", iv.as_bytes())?,
        })
    }
}

impl fmt::Debug for CipherKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CipherKeys(<redacted>)")
    }
}

fn leading_bytes<const N: usize>(
    which: &'static str,
    secret: &[u8],
) -> Result<[u8; N], CipherError> {
    secret
        .get(..N)
        .and_then(|head| head.try_into().ok())
        .ok_or(CipherError::SecretTooShort {
            which,
            required: N,
            actual: secret.len(),
        })
}

/// Pad, encrypt and hex-encode (lowercase).
pub fn encrypt(plaintext: &[u8], keys: &CipherKeys) -> String {
    let ciphertext = Aes128CbcEnc::new(&keys.key.into(), &keys.iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    hex::encode(ciphertext)
}

/// Inverse of [`encrypt`].
pub fn decrypt(ciphertext_hex: &str, keys: &CipherKeys) -> Result<Vec<u8>, CipherError> {
    let ciphertext =
        hex::decode(ciphertext_hex).map_err(|e| CipherError::InvalidHex(e.to_string()))?;

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CipherError::InvalidLength(ciphertext.len()));
    }

    Aes128CbcDec::new(&keys.key.into(), &keys.iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CipherError::InvalidPadding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0123456789abcdef";
    const IV: &str = "fedcba9876543210";

    fn keys() -> CipherKeys {
        CipherKeys::from_secrets(KEY, IV).unwrap()
    }

    fn hex16(s: &str) -> [u8; 16] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn matches_nist_cbc_aes128_first_block() {
        // SP 800-38A F.2.1; a full block of input gains a full padding block.
        let keys = CipherKeys::new(
            hex16("2b7e151628aed2a6abf7158809cf4f3c"),
            hex16("000102030405060708090a0b0c0d0e0f"),
        );
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let out = encrypt(&plaintext, &keys);

        assert_eq!(out.len(), 64);
        assert!(out.starts_with("7649abac8119b246cee98e9b12e9197d"));
    }

    #[test]
    fn round_trip() {
        for len in [0, 1, 15, 16, 17, 31, 32, 100] {
            let plaintext: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let hex = encrypt(&plaintext, &keys());
            assert_eq!(decrypt(&hex, &keys()).unwrap(), plaintext, "len {len}");
        }
    }

    #[test]
    fn output_is_lowercase_hex_of_whole_blocks() {
        let hex = encrypt(b"backpack", &keys());

        assert_eq!(hex.len(), 2 * BLOCK_SIZE);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn empty_input_still_produces_a_padding_block() {
        assert_eq!(encrypt(&[], &keys()).len(), 2 * BLOCK_SIZE);
    }

    #[test]
    fn static_iv_makes_encryption_deterministic() {
        assert_eq!(encrypt(b"same", &keys()), encrypt(b"same", &keys()));
    }

    #[test]
    fn long_secrets_are_truncated_to_sixteen_bytes() {
        let long = CipherKeys::from_secrets("0123456789abcdefEXTRA", "fedcba9876543210MORE").unwrap();
        assert_eq!(long, keys());
        assert_eq!(encrypt(b"payload", &long), encrypt(b"payload", &keys()));
    }

    #[test]
    fn short_key_fails_fast() {
        let err = CipherKeys::from_secrets("short", IV).unwrap_err();
        assert_eq!(
            err,
            CipherError::SecretTooShort {
                which: "key",
                required: 16,
                actual: 5
            }
        );
    }

    #[test]
    fn short_iv_fails_fast() {
        let err = CipherKeys::from_secrets(KEY, "fifteen-bytes!!").unwrap_err();
        assert!(matches!(
            err,
            CipherError::SecretTooShort {
                which: "iv",
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn debug_redacts_material() {
        let rendered = format!("{:?}", keys());
        assert_eq!(rendered, "CipherKeys(<redacted>)");
        assert!(!rendered.contains(KEY));
    }

    #[test]
    fn decrypt_rejects_non_hex() {
        assert!(matches!(
            decrypt("zz", &keys()),
            Err(CipherError::InvalidHex(_))
        ));
    }

    #[test]
    fn decrypt_rejects_partial_blocks() {
        assert_eq!(
            decrypt(&"ab".repeat(15), &keys()),
            Err(CipherError::InvalidLength(15))
        );
        assert_eq!(decrypt("", &keys()), Err(CipherError::InvalidLength(0)));
    }

    #[test]
    fn decrypt_accepts_uppercase_hex() {
        let hex = encrypt(b"case", &keys()).to_uppercase();
        assert_eq!(decrypt(&hex, &keys()).unwrap(), b"case");
    }
}
