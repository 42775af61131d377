use sha2::{Digest, Sha256};

/// Gravatar URL for an email: 200px, PG-rated, identicon fallback.
/// Gravatar hashes the trimmed, lowercased address.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm",
        hex::encode(digest)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_per_email() {
        assert_eq!(gravatar_url("a@b.co"), gravatar_url("a@b.co"));
        assert_ne!(gravatar_url("a@b.co"), gravatar_url("c@d.co"));
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(gravatar_url("  Dev@Example.COM "), gravatar_url("dev@example.com"));
    }

    #[test]
    fn carries_size_rating_and_default() {
        let url = gravatar_url("dev@example.com");
        assert!(url.starts_with("https://www.gravatar.com/avatar/"));
        assert!(url.ends_with("?s=200&r=pg&d=mm"));
    }
}
