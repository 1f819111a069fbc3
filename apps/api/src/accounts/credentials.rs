//! Password credentials: `sha256$<salt>$<hex digest>`.
//!
//! The digest is SHA-256 over `salt || password` with a fresh 128-bit salt
//! per credential. Verification recomputes it and compares in constant time.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

const SCHEME: &str = "sha256";

/// Derives a new stored credential for `password`.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = digest_hex(&salt, password);
    format!("{SCHEME}${salt}${digest}")
}

/// Returns true when `password` matches the stored credential.
/// Malformed or foreign-format credentials never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(scheme), Some(salt), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != SCHEME || salt.is_empty() {
        return false;
    }
    let actual = digest_hex(salt, password);
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
