use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn hash_sha256(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_sha256(data: &str, hashed: &str) -> bool {
    hash_sha256(data) == hashed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_known_vector() {
        assert_eq!(
            hash_sha256("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            hash_sha256(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn verify_matches_only_exact_digest() {
        let digest = hash_sha256("secret");
        assert!(verify_sha256("secret", &digest));
        assert!(!verify_sha256("Secret", &digest));
        assert!(!verify_sha256("secret", &digest.to_uppercase()));
    }
}
