//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LATCHKEY_PROFILE_DIR` - Profile directory backing the key-value store
//!   (default: `.latchkey`)
//! - `LATCHKEY_ARGON2_MEMORY_KIB` - Argon2 memory cost in KiB (default: 19456)
//! - `LATCHKEY_ARGON2_ITERATIONS` - Argon2 time cost (default: 2)
//! - `LATCHKEY_ARGON2_PARALLELISM` - Argon2 lanes (default: 1)
//!
//! Logging is configured separately through `RUST_LOG`.

use std::path::PathBuf;

use argon2::Params;
use thiserror::Error;

/// Default profile directory, relative to the working directory.
const DEFAULT_PROFILE_DIR: &str = ".latchkey";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the persisted key-value store
    pub profile_dir: PathBuf,
    /// Password hashing cost parameters
    pub hashing: HashingConfig,
}

/// Argon2id cost parameters used when hashing new passwords.
///
/// Existing hashes carry their own parameters, so changing these never
/// invalidates stored credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashingConfig {
    /// Build the argon2 parameter set.
    ///
    /// # Errors
    ///
    /// Returns `argon2::Error` if the costs are outside argon2's limits.
    pub fn params(&self) -> Result<Params, argon2::Error> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let profile_dir = lookup("LATCHKEY_PROFILE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_PROFILE_DIR), PathBuf::from);

        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: parse_or_default(&lookup, "LATCHKEY_ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or_default(&lookup, "LATCHKEY_ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or_default(
                &lookup,
                "LATCHKEY_ARGON2_PARALLELISM",
                defaults.parallelism,
            )?,
        };

        hashing.params().map_err(|e| {
            ConfigError::InvalidEnvVar("LATCHKEY_ARGON2_*".to_string(), e.to_string())
        })?;

        Ok(Self {
            profile_dir,
            hashing,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a numeric variable, falling back to `default` when unset.
fn parse_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u32,
) -> Result<u32, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
