use rand::Rng;
use sha2::{Digest, Sha256};

const SESSION_TOKEN_BYTES: usize = 32;

/// Generate an opaque session token (64 hex characters).
pub fn generate_session_token() -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..SESSION_TOKEN_BYTES).map(|_| rng.random()).collect();
    hex::encode(random_bytes)
}

/// Digest under which a session token is stored.
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_token() {
        let token = generate_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_session_token());
    }

    #[test]
    fn test_hash_is_stable_and_differs_from_token() {
        let token = generate_session_token();
        let hash = hash_session_token(&token);
        assert_eq!(hash, hash_session_token(&token));
        assert_ne!(hash, token);
        assert_eq!(
            hash_session_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
