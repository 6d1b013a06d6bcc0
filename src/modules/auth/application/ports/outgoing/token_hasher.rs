use sha2::{Digest, Sha256};

/// Digest used as the revocation key, so raw tokens never land in redis.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
