//! Salted password hashing for link access gates.
//!
//! Link passwords gate redirects, they are not account credentials; a salted
//! SHA-256 digest keeps verification cheap enough for the hot path while
//! never storing the plain secret. Stored form: `hex(salt)$hex(digest)`.

use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_LENGTH: usize = 16;

/// Hashes a plain password with a fresh random salt.
pub fn hash_password(plain: &str) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::rng().fill(&mut salt);

    format!("{}${}", hex::encode(salt), hex::encode(digest(&salt, plain)))
}

/// Verifies a candidate password against a stored `salt$digest` hash.
///
/// Malformed stored values verify as false rather than erroring; the gate
/// treats them as a wrong password.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };

    let actual = digest(&salt, candidate);

    // Byte-wise accumulation instead of an early-exit comparison.
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn digest(salt: &[u8], plain: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(plain.as_bytes());
    hasher.finalize().to_vec()
}
