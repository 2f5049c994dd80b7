use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::Aes256Gcm;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use thiserror::Error;

const FORMAT_VERSION: u8 = 0x01;
const NONCE_LEN: usize = 12;

/// Cryptographic errors
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Encryption failed: {0}")]
    Encryption(String),
    #[error("Decryption failed: {0}")]
    Decryption(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Base64 decode error: {0}")]
    Base64Decode(String),
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(String),
}

/// AES-256-GCM sealing for backend bearer tokens at rest.
///
/// Sealed tokens are base64 of `[version_byte][nonce(12)][ciphertext]`.
#[derive(Clone)]
pub struct SessionCipher {
    cipher: Aes256Gcm,
}

impl SessionCipher {
    /// Build a cipher from a 64-character hex key
    pub fn from_hex(key_hex: &str) -> Result<Self, CryptoError> {
        let key_bytes = hex::decode(key_hex.trim())
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;

        let key: [u8; 32] = key_bytes.try_into().map_err(|bytes: Vec<u8>| {
            CryptoError::InvalidKey(format!(
                "Encryption key must be 32 bytes (256 bits), got {}",
                bytes.len()
            ))
        })?;

        Ok(Self {
            cipher: Aes256Gcm::new(&key.into()),
        })
    }

    pub fn seal(&self, token: &str) -> Result<String, CryptoError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt((&nonce_bytes).into(), token.as_bytes())
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut sealed = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
        sealed.push(FORMAT_VERSION);
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(sealed))
    }

    pub fn open(&self, sealed_b64: &str) -> Result<String, CryptoError> {
        let sealed = BASE64
            .decode(sealed_b64)
            .map_err(|e| CryptoError::Base64Decode(e.to_string()))?;

        if sealed.len() < 1 + NONCE_LEN {
            return Err(CryptoError::InvalidData(
                "Sealed token too short (need at least 1 + 12 bytes for version + nonce)".to_string(),
            ));
        }

        if sealed[0] != FORMAT_VERSION {
            return Err(CryptoError::InvalidData(format!(
                "Unsupported encryption version: {}",
                sealed[0]
            )));
        }

        let nonce: [u8; NONCE_LEN] = sealed[1..1 + NONCE_LEN]
            .try_into()
            .map_err(|_| CryptoError::InvalidData("Failed to extract nonce".to_string()))?;

        let plaintext = self
            .cipher
            .decrypt((&nonce).into(), &sealed[1 + NONCE_LEN..])
            .map_err(|e| CryptoError::Decryption(e.to_string()))?;

        String::from_utf8(plaintext).map_err(|e| CryptoError::Utf8Error(e.to_string()))
    }
}

impl std::fmt::Debug for SessionCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionCipher(..)")
    }
}
