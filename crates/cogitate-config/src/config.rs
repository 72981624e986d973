// cogitate-config/src/config.rs
// ============================================================================
// Module: Cogitate Configuration
// Description: Loads and validates the server's environment-variable config.
// Purpose: Give cogitate-cli a single, fallible entry point for turning the
//          process environment into a ServerConfig-ready value.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Three variables, all optional except `COGITATE_STORE_PATH` when the
//! backend is `sqlite`: `COGITATE_DEBUG`, `COGITATE_STORE_BACKEND`,
//! `COGITATE_STORE_PATH`. Missing or malformed values fail closed with a
//! [`ConfigError`] naming the offending variable, in the manner of the
//! teacher's `decision-gate-config::ConfigError`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::env::VarError;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Enables verbose (debug-level) audit output when set to a truthy value.
const VAR_DEBUG: &str = "COGITATE_DEBUG";
/// Selects the thought-store backend: `memory` or `sqlite`.
const VAR_STORE_BACKEND: &str = "COGITATE_STORE_BACKEND";
/// Path to the `SQLite` database file; required when the backend is `sqlite`.
const VAR_STORE_PATH: &str = "COGITATE_STORE_PATH";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {variable}: {reason}")]
    InvalidValue {
        /// The environment variable name.
        variable: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A variable required by the chosen configuration was not set.
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),
}

// ============================================================================
// SECTION: Store Backend
// ============================================================================

/// Which thought-store backend the server should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackendKind {
    /// An in-process, non-persistent store.
    Memory,
    /// A `SQLite`-backed store.
    Sqlite,
}

impl StoreBackendKind {
    /// Parses a backend name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `raw` is neither `memory` nor
    /// `sqlite`.
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(ConfigError::InvalidValue {
                variable: VAR_STORE_BACKEND,
                reason: format!("expected \"memory\" or \"sqlite\", got \"{other}\""),
            }),
        }
    }
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Process configuration assembled from `COGITATE_*` environment variables.
#[derive(Clone)]
pub struct Config {
    /// Whether verbose audit output is enabled.
    pub debug: bool,
    /// Which thought-store backend to open.
    pub store_backend: StoreBackendKind,
    /// Path to the `SQLite` database file, set only when `store_backend` is
    /// [`StoreBackendKind::Sqlite`].
    pub store_path: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("debug", &self.debug)
            .field("store_backend", &self.store_backend)
            .field("store_path", &self.store_path)
            .finish()
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `COGITATE_DEBUG` or
    /// `COGITATE_STORE_BACKEND` is set but not parseable, and
    /// [`ConfigError::MissingRequired`] if the backend is `sqlite` and
    /// `COGITATE_STORE_PATH` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let debug = parse_bool_var(VAR_DEBUG)?;
        let store_backend = match read_var(VAR_STORE_BACKEND) {
            Some(raw) => StoreBackendKind::parse(&raw)?,
            None => StoreBackendKind::Memory,
        };
        let store_path = match store_backend {
            StoreBackendKind::Memory => read_var(VAR_STORE_PATH).map(PathBuf::from),
            StoreBackendKind::Sqlite => {
                let raw = read_var(VAR_STORE_PATH).ok_or(ConfigError::MissingRequired(VAR_STORE_PATH))?;
                Some(PathBuf::from(raw))
            }
        };

        Ok(Self { debug, store_backend, store_path })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads `name`, treating an empty string the same as unset.
fn read_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if value.is_empty() => None,
        Ok(value) => Some(value),
        Err(VarError::NotPresent | VarError::NotUnicode(_)) => None,
    }
}

/// Parses a boolean environment variable, defaulting to `false` when unset.
///
/// Accepts `"true"`/`"false"`/`"1"`/`"0"`, case-insensitively.
fn parse_bool_var(name: &'static str) -> Result<bool, ConfigError> {
    match read_var(name) {
        None => Ok(false),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidValue { variable: name, reason: format!("expected a boolean, got \"{other}\"") }),
        },
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(unsafe_code, reason = "tests mutate process env to exercise from_env() under controlled conditions")]
mod tests {
    use super::Config;
    use super::ConfigError;
    use super::StoreBackendKind;
    use std::sync::Mutex;

    /// Serializes env-mutating tests; `std::env` is process-global.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Clears every `COGITATE_*` variable this module reads, so each test
    /// starts from a blank environment regardless of run order.
    fn clear_env() {
        for var in ["COGITATE_DEBUG", "COGITATE_STORE_BACKEND", "COGITATE_STORE_PATH"] {
            // SAFETY: tests hold `ENV_LOCK` for their whole duration, so no
            // other thread observes the environment mid-mutation.
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn defaults_to_an_in_memory_store_with_debug_off() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        let config = Config::from_env().unwrap();
        assert!(!config.debug);
        assert_eq!(config.store_backend, StoreBackendKind::Memory);
        assert!(config.store_path.is_none());
    }

    #[test]
    fn sqlite_backend_requires_a_store_path() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        // SAFETY: `_guard` holds `ENV_LOCK` for this test's duration.
        unsafe {
            std::env::set_var("COGITATE_STORE_BACKEND", "sqlite");
        }
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::MissingRequired("COGITATE_STORE_PATH"))));
        // SAFETY: `_guard` holds `ENV_LOCK` for this test's duration.
        unsafe {
            std::env::set_var("COGITATE_STORE_PATH", "/tmp/cogitate.sqlite3");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.store_backend, StoreBackendKind::Sqlite);
        assert_eq!(config.store_path.unwrap().to_str().unwrap(), "/tmp/cogitate.sqlite3");
        clear_env();
    }

    #[test]
    fn an_unrecognized_backend_name_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        // SAFETY: `_guard` holds `ENV_LOCK` for this test's duration.
        unsafe {
            std::env::set_var("COGITATE_STORE_BACKEND", "postgres");
        }
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { variable: "COGITATE_STORE_BACKEND", .. })));
        clear_env();
    }
}
