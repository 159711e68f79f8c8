//! Shared test utilities
//!
//! - `TestDatabase`: PostgreSQL container with the todo schema applied (feature: "postgres")
//! - `TestDataBuilder`: Deterministic todo fields and timestamps (always available)
//! - `assertions`: gRPC status helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let title = builder.title(1);
//!     let created_at = builder.timestamp(0);
//! }
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic values
///
/// Timestamps are whole seconds, so they survive the microsecond
/// resolution of `TIMESTAMPTZ` unchanged.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_todo");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn title(&self, n: u32) -> String {
        format!("title ({}-{})", self.seed % 10_000, n)
    }

    pub fn description(&self, n: u32) -> String {
        format!("description ({}-{})", self.seed % 10_000, n)
    }

    /// A fixed instant in 2024, shifted by the seed and `offset_secs`
    pub fn timestamp(&self, offset_secs: i64) -> DateTime<Utc> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        base + Duration::seconds((self.seed % 86_400) as i64 + offset_secs)
    }
}

/// Test assertion helpers
pub mod assertions {
    use tonic::{Code, Status};

    /// Assert that a call failed with `expected`, returning the status
    pub fn assert_code<T: std::fmt::Debug>(result: Result<T, Status>, expected: Code, context: &str) -> Status {
        match result {
            Ok(value) => panic!("{}: expected {:?}, got Ok({:?})", context, expected, value),
            Err(status) => {
                assert_eq!(
                    status.code(),
                    expected,
                    "{}: expected {:?}, got {:?} ({})",
                    context,
                    expected,
                    status.code(),
                    status.message()
                );
                status
            }
        }
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
