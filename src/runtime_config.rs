//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for routeforge's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `ROUTEFORGE_MAX_PATH_LEN`
//!
//! Longest candidate path (in bytes) a compiled route will try to match. Longer
//! paths are rejected without running the matcher.
//!
//! Default: `2048`
//!
//! ### `ROUTEFORGE_REGEX_SIZE_LIMIT`
//!
//! Upper bound on the compiled size of a single route pattern, handed to the
//! regex engine. Accepts values in:
//! - Decimal: `1048576`
//! - Hexadecimal: `0x100000`
//!
//! Default: `0x100000` (1 MiB)
//!
//! ### `ROUTEFORGE_APPEND_SLASH`
//!
//! Default trailing-slash policy for new [`RouteBuilder`](crate::builder::RouteBuilder)s:
//! `true` forces registered URLs to end with `/`, `false` strips it.
//!
//! Default: `false`
//!
//! ## Usage
//!
//! ```rust
//! use routeforge::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Max path length: {} bytes", config.max_path_len);
//! ```
//!
//! Invalid values fall back to the defaults.

use std::env;

const DEFAULT_MAX_PATH_LEN: usize = 2048;
const DEFAULT_REGEX_SIZE_LIMIT: usize = 0x10_0000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Longest path a route will attempt to match (default: 2048)
    pub max_path_len: usize,
    /// Regex program size limit per compiled route (default: 1 MiB)
    pub regex_size_limit: usize,
    /// Whether builders force a trailing slash (default: false)
    pub append_trailing_slash: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_path_len: DEFAULT_MAX_PATH_LEN,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            append_trailing_slash: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let max_path_len = env::var("ROUTEFORGE_MAX_PATH_LEN")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_MAX_PATH_LEN);
        let regex_size_limit = match env::var("ROUTEFORGE_REGEX_SIZE_LIMIT") {
            Ok(val) => parse_size(&val).unwrap_or(DEFAULT_REGEX_SIZE_LIMIT),
            Err(_) => DEFAULT_REGEX_SIZE_LIMIT,
        };
        let append_trailing_slash = env::var("ROUTEFORGE_APPEND_SLASH")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(false);

        RuntimeConfig {
            max_path_len,
            regex_size_limit,
            append_trailing_slash,
        }
    }
}

fn parse_size(val: &str) -> Option<usize> {
    if let Some(hex) = val.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}
