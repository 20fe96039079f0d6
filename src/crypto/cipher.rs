//! AES-256-CBC field encryption
//!
//! Booknlife encrypts individual request fields (not whole bodies) before
//! transmission. Plaintext is UTF-8, padding is PKCS7, ciphertext travels
//! as standard base64. The balance field comes back the same way and is
//! decrypted with the pay keyset.

use aes::Aes256;
use base64::prelude::*;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use super::keys::{KeySet, AUTH_KEYS, PAY_KEYS};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Crypto error types
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Invalid base64 ciphertext: {0}")]
    InvalidBase64(String),

    #[error("Decryption failed (bad padding)")]
    BadPadding,

    #[error("Decrypted data is not valid UTF-8")]
    NotUtf8,
}

fn encrypt_with(keys: &KeySet, plaintext: &str) -> Result<String, CryptoError> {
    let key = hex::decode(keys.key_hex).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let iv = hex::decode(keys.iv_hex).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;

    let cipher = Aes256CbcEnc::new_from_slices(&key, &iv)
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Ok(BASE64_STANDARD.encode(ciphertext))
}

fn decrypt_with(keys: &KeySet, ciphertext_b64: &str) -> Result<String, CryptoError> {
    let key = hex::decode(keys.key_hex).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let iv = hex::decode(keys.iv_hex).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;

    let ciphertext = BASE64_STANDARD
        .decode(ciphertext_b64.trim())
        .map_err(|e| CryptoError::InvalidBase64(e.to_string()))?;

    let cipher = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError::BadPadding)?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::NotUtf8)
}

/// Encrypt a login credential field (id or password) with the auth keyset.
pub fn encrypt_login_field(value: &str) -> Result<String, CryptoError> {
    encrypt_with(&AUTH_KEYS, value)
}

/// Encrypt a pin number or pin password with the pay keyset.
pub fn encrypt_pay_field(value: &str) -> Result<String, CryptoError> {
    encrypt_with(&PAY_KEYS, value)
}

/// Decrypt a pay-keyset ciphertext returned by the platform (the balance).
pub fn decrypt_pay_field(ciphertext_b64: &str) -> Result<String, CryptoError> {
    decrypt_with(&PAY_KEYS, ciphertext_b64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_field_round_trip() {
        let ct = encrypt_login_field("testuser01").unwrap();
        assert_ne!(ct, "testuser01");
        let pt = decrypt_with(&AUTH_KEYS, &ct).unwrap();
        assert_eq!(pt, "testuser01");
    }

    #[test]
    fn pay_field_round_trip() {
        let ct = encrypt_pay_field("1234567890123456").unwrap();
        let pt = decrypt_pay_field(&ct).unwrap();
        assert_eq!(pt, "1234567890123456");
    }

    #[test]
    fn keysets_produce_distinct_ciphertext() {
        let auth = encrypt_login_field("50000").unwrap();
        let pay = encrypt_pay_field("50000").unwrap();
        assert_ne!(auth, pay);
    }

    #[test]
    fn fixed_iv_is_deterministic() {
        // The platform uses a static IV, so the same plaintext always
        // produces the same ciphertext.
        let a = encrypt_pay_field("0000").unwrap();
        let b = encrypt_pay_field("0000").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ciphertext_is_valid_base64() {
        let ct = encrypt_pay_field("50000").unwrap();
        assert!(BASE64_STANDARD.decode(&ct).is_ok());
    }

    #[test]
    fn decrypt_rejects_invalid_base64() {
        let err = decrypt_pay_field("not base64 !!!").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidBase64(_)));
    }

    #[test]
    fn decrypt_rejects_garbage_ciphertext() {
        // Valid base64, but not a ciphertext produced under the pay keyset.
        let garbage = BASE64_STANDARD.encode([0u8; 32]);
        let err = decrypt_pay_field(&garbage).unwrap_err();
        assert!(matches!(err, CryptoError::BadPadding));
    }

    #[test]
    fn handles_unicode_plaintext() {
        let ct = encrypt_login_field("사용자암호!").unwrap();
        let pt = decrypt_with(&AUTH_KEYS, &ct).unwrap();
        assert_eq!(pt, "사용자암호!");
    }
}
