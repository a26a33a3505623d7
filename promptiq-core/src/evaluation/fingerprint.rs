use ring::digest;

/// Length of a content fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 10;

/// Deterministic digest of trimmed prompt text, used for client-cooperative
/// duplicate detection. SHA-1 is a fingerprint here, not a security primitive.
pub fn content_fingerprint(text: &str) -> String {
    let digest = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, text.as_bytes());
    let mut fingerprint = hex::encode(digest.as_ref());
    fingerprint.truncate(FINGERPRINT_LEN);
    fingerprint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(
            content_fingerprint("Explain the water cycle"),
            content_fingerprint("Explain the water cycle")
        );
    }

    #[test]
    fn test_fingerprint_length() {
        assert_eq!(content_fingerprint("any text at all").len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_fingerprint_known_value() {
        // SHA-1("") = da39a3ee5e6b4b0d3255bfef95601890afd80709
        assert_eq!(content_fingerprint(""), "da39a3ee5e");
    }

    #[test]
    fn test_fingerprint_differs_by_content() {
        assert_ne!(content_fingerprint("prompt a"), content_fingerprint("prompt b"));
    }
}
