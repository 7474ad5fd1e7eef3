//! Store configuration.

use std::fmt;

/// Bucket size at which the collision table starts warning.
pub const DEFAULT_COLLISION_WARN_THRESHOLD: usize = 16;

/// Errors from [`StoreConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Collision warning threshold must be greater than zero.
    ZeroCollisionThreshold,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCollisionThreshold => {
                write!(f, "collision_warn_threshold must be greater than zero")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for a [`TripleStore`](crate::TripleStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of local nodes sharing one hash after which a warning is
    /// logged. Ordering inside a bucket is linear in its size.
    pub collision_warn_threshold: usize,

    /// Run [`TripleStore::check_consistency`](crate::TripleStore::check_consistency)
    /// after every bulk load.
    pub verify_on_bulk_load: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collision_warn_threshold: DEFAULT_COLLISION_WARN_THRESHOLD,
            verify_on_bulk_load: false,
        }
    }
}

impl StoreConfig {
    /// Sets the collision bucket size that triggers a warning.
    #[must_use]
    pub fn with_collision_warn_threshold(mut self, threshold: usize) -> Self {
        self.collision_warn_threshold = threshold;
        self
    }

    /// Enables or disables the consistency check after bulk loads.
    #[must_use]
    pub fn with_verify_on_bulk_load(mut self, verify: bool) -> Self {
        self.verify_on_bulk_load = verify;
        self
    }

    /// Checks the configuration for values that make no sense.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collision_warn_threshold == 0 {
            return Err(ConfigError::ZeroCollisionThreshold);
        }
        Ok(())
    }
}
