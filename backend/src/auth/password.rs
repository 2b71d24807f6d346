//! PBKDF2-HMAC-SHA256 password hashes.
//!
//! Stored form: `pbkdf2:sha256:<iterations>$<salt>$<hex digest>`, the same
//! layout werkzeug writes, so hashes created by older deployments verify.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

const METHOD: &str = "pbkdf2:sha256";
const ITERATIONS: u32 = 600_000;
const DIGEST_LEN: usize = 32;

pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    encode(password, &salt, ITERATIONS)
}

/// Checks `password` against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(method), Some(salt), Some(expected), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Some(iterations) = method
        .strip_prefix(METHOD)
        .and_then(|rest| rest.strip_prefix(':'))
    else {
        return false;
    };
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let Ok(expected) = hex::decode(expected) else {
        return false;
    };
    if iterations == 0 || expected.len() != DIGEST_LEN {
        return false;
    }
    derive(password, salt, iterations)
        .as_slice()
        .ct_eq(expected.as_slice())
        .into()
}

fn encode(password: &str, salt: &str, iterations: u32) -> String {
    format!(
        "{}:{}${}${}",
        METHOD,
        iterations,
        salt,
        hex::encode(derive(password, salt, iterations))
    )
}

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}
