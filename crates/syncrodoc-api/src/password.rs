//! Password hashing. bcrypt generates its own random salt and compares in
//! constant time, so a digest is never re-derived and byte-compared here.

/// bcrypt work factor. The cost is embedded in each digest, so changing it
/// later leaves existing digests verifiable.
const BCRYPT_COST: u32 = 10;

pub fn hash_password(plaintext: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plaintext, BCRYPT_COST)
}

/// Returns false for any non-matching input. A digest that does not parse as
/// bcrypt counts as a mismatch rather than an error: the stored digest side
/// is trusted data, and the candidate side is attacker-controlled, so this
/// path must never panic or error out.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_not_the_plaintext() {
        let digest = hash_password("longpass1").unwrap();
        assert_ne!(digest, "longpass1");
        assert!(digest.starts_with("$2"));
    }

    #[test]
    fn verify_roundtrip() {
        let digest = hash_password("longpass1").unwrap();
        assert!(verify_password("longpass1", &digest));
    }

    #[test]
    fn wrong_password_fails() {
        let digest = hash_password("longpass1").unwrap();
        assert!(!verify_password("longpass2", &digest));
    }

    #[test]
    fn same_password_hashes_differently() {
        // Distinct salts per digest.
        let a = hash_password("longpass1").unwrap();
        let b = hash_password("longpass1").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("longpass1", &b));
    }

    #[test]
    fn malformed_digest_is_a_mismatch_not_a_panic() {
        assert!(!verify_password("anything", "not-a-bcrypt-digest"));
        assert!(!verify_password("anything", ""));
    }
}
