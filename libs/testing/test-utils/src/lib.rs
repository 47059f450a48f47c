//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//! - `TestDataBuilder`: deterministic test data keyed by test name
//! - `assertions`: assertion helpers
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let db = mongo.database("my_test");
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let username = builder.name("user", "owner");
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;

use uuid::Uuid;

/// Deterministic test data derived from a seed.
///
/// Two builders with the same seed produce the same values, so failures are
/// reproducible and different tests never collide on unique keys.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A UUID derived from the seed and `salt`.
    pub fn id(&self, salt: u64) -> Uuid {
        let hi = self.seed.to_le_bytes();
        let lo = self.seed.wrapping_add(salt).rotate_left(17).to_le_bytes();
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&hi);
        bytes[8..].copy_from_slice(&lo);
        Uuid::from_bytes(bytes)
    }

    /// `test-{prefix}-{seed}-{suffix}`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("shop", "main"), "test-shop-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.com", local, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert `actual` is within `tolerance` of `expected`.
    pub fn assert_close(actual: f64, expected: f64, tolerance: f64, context: &str) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "{}: expected {} ± {}, got {}",
            context,
            expected,
            tolerance,
            actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::from_test_name("my_test");
        let b = TestDataBuilder::from_test_name("my_test");

        assert_eq!(a.id(1), b.id(1));
        assert_eq!(a.name("shop", "x"), b.name("shop", "x"));
    }

    #[test]
    fn test_data_builder_salts_and_names_differ() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");

        assert_ne!(a.id(1), b.id(1));
        assert_ne!(a.id(1), a.id(2));
        assert_ne!(a.email("owner"), b.email("owner"));
    }
}
