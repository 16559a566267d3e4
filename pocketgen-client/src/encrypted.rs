//! Passphrase-encrypted credential storage.
//!
//! The credentials are serialized to JSON and sealed with AES-256-GCM under
//! a key derived from the passphrase with scrypt. The file is a dotenv file
//! with three keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `SALT` | base64url scrypt salt |
//! | `DATA` | base64url nonce followed by the ciphertext |
//! | `SCRYPT_LOG_N` | scrypt cost parameter (log2 of N) |

use crate::credentials::{Credentials, dotenv_error};
use crate::error::ClientError;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use rand::RngCore;
use rand::rngs::OsRng;
use std::io::Write;
use std::path::Path;

/// Default encrypted credentials file name.
pub const DEFAULT_ENCRYPTED_CREDENTIALS_FILE: &str = "credentials.enc.env";

/// Default scrypt cost, as log2 of N.
pub const DEFAULT_SCRYPT_LOG_N: u8 = 15;

const SALT_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

impl Credentials {
    /// Saves the credentials encrypted with `passphrase`, replacing any
    /// existing file.
    ///
    /// # Errors
    /// Returns `ClientError` if the key cannot be derived or the file cannot
    /// be written.
    pub fn save_encrypted(&self, path: &Path, passphrase: &str) -> Result<(), ClientError> {
        self.save_encrypted_with_cost(path, passphrase, DEFAULT_SCRYPT_LOG_N)
    }

    /// Saves the credentials encrypted with an explicit scrypt cost.
    ///
    /// # Errors
    /// Returns `ClientError` if the key cannot be derived or the file cannot
    /// be written.
    pub fn save_encrypted_with_cost(
        &self,
        path: &Path,
        passphrase: &str,
        log_n: u8,
    ) -> Result<(), ClientError> {
        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut nonce);

        let plaintext = serde_json::to_vec(self)
            .map_err(|e| ClientError::encryption(format!("cannot serialize credentials: {}", e)))?;
        let ciphertext = cipher(passphrase, &salt, log_n)?
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_ref())
            .map_err(|_| ClientError::encryption("cannot encrypt credentials"))?;

        let mut data = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        data.extend_from_slice(&nonce);
        data.extend_from_slice(&ciphertext);

        let mut file = std::fs::File::create(path)?;
        writeln!(file, "SALT={}", URL_SAFE.encode(salt))?;
        writeln!(file, "DATA={}", URL_SAFE.encode(&data))?;
        writeln!(file, "SCRYPT_LOG_N={}", log_n)?;
        file.sync_all()?;

        tracing::info!("Saved encrypted credentials to {}", path.display());
        Ok(())
    }

    /// Loads credentials encrypted with `passphrase`.
    ///
    /// # Errors
    /// Returns `ClientError` if the file cannot be read, is malformed, or
    /// does not decrypt with `passphrase`.
    pub fn load_encrypted(path: &Path, passphrase: &str) -> Result<Self, ClientError> {
        let mut salt = None;
        let mut data = None;
        let mut log_n = DEFAULT_SCRYPT_LOG_N;

        let entries = dotenvy::from_path_iter(path).map_err(dotenv_error)?;
        for entry in entries {
            let (key, value) = entry.map_err(dotenv_error)?;
            match key.as_str() {
                "SALT" => salt = Some(decode("SALT", &value)?),
                "DATA" => data = Some(decode("DATA", &value)?),
                "SCRYPT_LOG_N" => {
                    log_n = value.parse().map_err(|_| {
                        ClientError::encryption(format!("invalid SCRYPT_LOG_N {:?}", value))
                    })?;
                }
                _ => tracing::debug!("Ignoring unknown encrypted credentials key {}", key),
            }
        }

        let salt = salt.ok_or_else(|| ClientError::encryption("missing SALT"))?;
        let data = data.ok_or_else(|| ClientError::encryption("missing DATA"))?;
        if data.len() <= NONCE_LEN {
            return Err(ClientError::encryption("DATA is too short"));
        }
        let (nonce, ciphertext) = data.split_at(NONCE_LEN);

        let plaintext = cipher(passphrase, &salt, log_n)?
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| ClientError::encryption("wrong passphrase or corrupted credentials file"))?;
        let credentials = serde_json::from_slice(&plaintext)
            .map_err(|e| ClientError::encryption(format!("invalid credentials payload: {}", e)))?;

        tracing::debug!("Loaded encrypted credentials from {}", path.display());
        Ok(credentials)
    }
}

fn decode(key: &str, value: &str) -> Result<Vec<u8>, ClientError> {
    URL_SAFE
        .decode(value.trim())
        .map_err(|e| ClientError::encryption(format!("invalid {}: {}", key, e)))
}

fn cipher(passphrase: &str, salt: &[u8], log_n: u8) -> Result<Aes256Gcm, ClientError> {
    let params = scrypt::Params::new(log_n, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| ClientError::encryption(format!("invalid scrypt parameters: {}", e)))?;

    let mut key = [0u8; KEY_LEN];
    scrypt::scrypt(passphrase.as_bytes(), salt, &params, &mut key)
        .map_err(|e| ClientError::encryption(format!("key derivation failed: {}", e)))?;

    Aes256Gcm::new_from_slice(&key).map_err(|e| ClientError::encryption(e.to_string()))
}
