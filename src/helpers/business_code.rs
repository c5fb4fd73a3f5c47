use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::db;

pub const CODE_LEN: usize = 8;

/// Derive an 8-character Business ID from the signup details plus a random
/// nonce: the first four bytes of a sha256 digest, hex-encoded and uppercased.
fn make_code(name: &str, business_type: &str, state: &str) -> String {
    let nonce: [u8; 4] = rand::thread_rng().gen();

    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(business_type.as_bytes());
    hasher.update(state.as_bytes());
    hasher.update(nonce);
    let digest = hasher.finalize();

    digest[..CODE_LEN / 2]
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect()
}

/// Generate a Business ID that does not collide with an existing one.
pub async fn generate_code(
    pool: &PgPool,
    name: &str,
    business_type: &str,
    state: &str,
) -> Result<String, sqlx::Error> {
    loop {
        let code = make_code(name, business_type, state);
        if db::business::is_code_unique(pool, &code).await? {
            return Ok(code);
        }
    }
}

/// Opaque chat session token, 16 hex characters.
pub fn make_session_id() -> String {
    let nonce: [u8; 8] = rand::thread_rng().gen();
    nonce.iter().map(|b| format!("{:02x}", b)).collect()
}
