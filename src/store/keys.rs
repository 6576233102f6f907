//! Record key generation
//!
//! Records read from disk are keyed by array position ("0", "1", ...).
//! Records inserted in a session get a fresh generated key instead.

use std::fmt::Debug;

use uuid::Uuid;

/// Source of fresh record keys
pub trait KeyGenerator: Debug {
    /// Returns a key not handed out before
    fn next_key(&self) -> String;
}

/// Random fixed-width keys: 32 lowercase hex characters (UUID v4)
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidKeyGenerator;

impl KeyGenerator for UuidKeyGenerator {
    fn next_key(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_fixed_width_hex() {
        let key = UuidKeyGenerator.next_key();
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_keys_unique() {
        let keys: HashSet<String> = (0..1000).map(|_| UuidKeyGenerator.next_key()).collect();
        assert_eq!(keys.len(), 1000);
    }
}
