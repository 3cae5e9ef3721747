use uuid::Uuid;

/// Generate a record id not contained in `taken`.
/// Format: PREFIX-XXXXXXXXXXXX (kind prefix + first 12 hex chars of a v4 uuid)
pub fn generate_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let uuid = Uuid::new_v4().simple().to_string();
        let id = format!("{}-{}", prefix, &uuid[..12]);
        if !taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_prefixed_hex() {
        let id = generate_id("session", |_| false);
        let suffix = id.strip_prefix("session-").unwrap();
        assert_eq!(suffix.len(), 12);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn retries_until_unused() {
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let id = generate_id("student", |candidate| seen.contains(candidate));
            assert!(seen.insert(id));
        }
    }
}
