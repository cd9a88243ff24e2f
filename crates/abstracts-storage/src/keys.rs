//! Shared key generation for storage backends.

/// Storage key of an abstract: `{bucket}/{cpf}_{unix_millis}.pdf`.
pub fn abstract_key(bucket: &str, cpf: &str, unix_millis: i64) -> String {
    format!("{}/{}_{}.pdf", bucket.trim_matches('/'), cpf, unix_millis)
}

/// Reject keys that could escape the storage root.
pub(crate) fn check_key(key: &str) -> bool {
    !key.is_empty() && !key.contains("..") && !key.starts_with('/') && !key.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abstract_key_layout() {
        assert_eq!(
            abstract_key("resumos", "12345678900", 1718035200000),
            "resumos/12345678900_1718035200000.pdf"
        );
        assert_eq!(
            abstract_key("/resumos/", "12345678900", 1),
            "resumos/12345678900_1.pdf"
        );
    }

    #[test]
    fn test_check_key() {
        assert!(check_key("resumos/12345678900_1.pdf"));
        assert!(!check_key(""));
        assert!(!check_key("/etc/passwd"));
        assert!(!check_key("resumos/../../etc/passwd"));
        assert!(!check_key("resumos\\x.pdf"));
    }
}
