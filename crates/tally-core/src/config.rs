//! Configuration types for tally.
//!
//! [`Config::load`] layers a user-supplied TOML file on top of the built-in
//! defaults. [`Config::defaults`] returns the defaults without touching the
//! filesystem (useful in tests).

use serde::Deserialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
host   = "0.0.0.0"
port   = 3000
app_id = "unknown_app_id"

[security]
verification_token = "your_verification_token_here"
require_signature  = false

[storage]
dir = "storage"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Reported in the `/meta.json` discovery descriptor.
    #[serde(default = "default_app_id")]
    pub app_id: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_app_id() -> String {
    "unknown_app_id".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            app_id: default_app_id(),
        }
    }
}

/// `[security]` section.
///
/// When `require_signature` is false (the default, matching the platform's
/// development mode), requests missing any of the three signature headers
/// are accepted unauthenticated. Supplied signatures are always checked.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_verification_token")]
    pub verification_token: String,
    #[serde(default)]
    pub require_signature: bool,
}

fn default_verification_token() -> String {
    "your_verification_token_here".to_string()
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            verification_token: default_verification_token(),
            require_signature: false,
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    "storage".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from the given TOML file, layered on top of the built-in
    /// defaults. The file must exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
