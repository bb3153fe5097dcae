//! Sealed-box encryption for GitHub secrets.
//!
//! GitHub expects secret values encrypted with a libsodium sealed box
//! (X25519 + XSalsa20-Poly1305 with an ephemeral sender key) under the
//! repository's public key, base64 encoded on both sides of the call.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crypto_box::aead::OsRng;
use crypto_box::{PublicKey, SecretKey};
use tracing::trace;

use crate::error::CipherError;

/// X25519 key length in bytes.
const KEY_SIZE: usize = 32;

/// Bytes a sealed box adds to the plaintext: ephemeral public key plus MAC tag.
pub const SEAL_OVERHEAD: usize = KEY_SIZE + 16;

/// Encrypt `plaintext` for the holder of `public_key_b64`.
///
/// # Arguments
///
/// * `plaintext` - Raw secret bytes
/// * `public_key_b64` - Recipient X25519 public key, standard base64
///
/// # Returns
///
/// Base64-encoded sealed box.
///
/// # Errors
///
/// Returns `CipherError::Decode` if the key is not valid base64 and
/// `CipherError::InvalidKeyLength` if it does not decode to 32 bytes.
pub fn seal(plaintext: &[u8], public_key_b64: &str) -> Result<String, CipherError> {
    let public_key = decode_public_key(public_key_b64)?;

    trace!(plaintext_len = plaintext.len(), "sealing");

    let sealed = public_key
        .seal(&mut OsRng, plaintext)
        .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

    trace!(ciphertext_len = sealed.len(), "sealed");

    Ok(STANDARD.encode(sealed))
}

/// Open a base64 sealed box with the recipient's secret key.
///
/// # Errors
///
/// Returns `CipherError::Decode` for malformed base64 and
/// `CipherError::DecryptionFailed` when the key does not match or the
/// ciphertext was tampered with.
pub fn open(sealed_b64: &str, secret_key: &SecretKey) -> Result<Vec<u8>, CipherError> {
    let sealed = STANDARD.decode(sealed_b64)?;
    secret_key
        .unseal(&sealed)
        .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))
}

/// Generate a fresh keypair, returning the secret key and its base64 public key.
pub fn generate_keypair() -> (SecretKey, String) {
    let secret_key = SecretKey::generate(&mut OsRng);
    let public_b64 = STANDARD.encode(secret_key.public_key().as_bytes());
    (secret_key, public_b64)
}

fn decode_public_key(public_key_b64: &str) -> Result<PublicKey, CipherError> {
    let bytes = STANDARD.decode(public_key_b64)?;
    let bytes: [u8; KEY_SIZE] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| CipherError::InvalidKeyLength(bytes.len()))?;
    Ok(PublicKey::from(bytes))
}
