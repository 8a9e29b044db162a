//! Server settings loaded via OrthoConfig.
//!
//! Values come from `TALFY_*` environment variables, CLI flags and optional
//! configuration files. Optional fields fall back to the defaults exposed by
//! the accessors below. Session settings are validated against the build
//! mode: release builds refuse ephemeral keys and short key files.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

use crate::domain::DEFAULT_PAGE_SIZE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;

/// Build mode used to decide how strict session validation is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to ephemeral keys with a warning.
    Debug,
    /// Release builds require a readable key file.
    Release,
}

impl BuildMode {
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while interpreting settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid same_site value '{value}'; expected lax, strict or none")]
    InvalidSameSite { value: String },
    #[error("same_site=none requires cookie_secure=true in release builds")]
    InsecureSameSiteNone,
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("session_allow_ephemeral must be false in release builds")]
    EphemeralNotAllowed,
}

/// Settings for the Talfy HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TALFY")]
pub struct TalfySettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open by the pool.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Generate a throwaway session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies: lax, strict or none.
    pub same_site: Option<String>,
    /// Profiles fetched per store round trip when listing.
    pub list_page_size: Option<usize>,
}

impl TalfySettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn pool_min_idle(&self) -> u32 {
        self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)
    }

    pub fn pool_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.pool_connection_timeout_secs
                .unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
        )
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(SESSION_KEY_DEFAULT_PATH))
    }

    pub const fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    pub fn list_page_size(&self) -> usize {
        self.list_page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    /// Resolve the cookie `SameSite` policy.
    ///
    /// `None` without a secure cookie is rejected in release builds and
    /// tolerated with a warning in debug builds.
    pub fn same_site(&self, mode: BuildMode) -> Result<SameSite, SettingsError> {
        let Some(raw) = self.same_site.as_deref() else {
            return Ok(SameSite::Lax);
        };
        let same_site = match raw.trim().to_ascii_lowercase().as_str() {
            "lax" => SameSite::Lax,
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            _ => {
                return Err(SettingsError::InvalidSameSite {
                    value: raw.to_owned(),
                });
            }
        };
        if same_site == SameSite::None && !self.cookie_secure() {
            if mode == BuildMode::Release {
                return Err(SettingsError::InsecureSameSiteNone);
            }
            warn!("same_site=none without cookie_secure; browsers may reject the cookie");
        }
        Ok(same_site)
    }

    /// Load the session signing key.
    ///
    /// An unreadable key file yields an ephemeral key in debug builds or when
    /// `session_allow_ephemeral` is set; release builds never allow the flag.
    pub fn session_key(&self, mode: BuildMode) -> Result<Key, SettingsError> {
        if mode == BuildMode::Release && self.session_allow_ephemeral {
            return Err(SettingsError::EphemeralNotAllowed);
        }
        let path = self.session_key_file();
        match std::fs::read(path) {
            Ok(mut bytes) => {
                let length = bytes.len();
                if length < SESSION_KEY_MIN_LEN {
                    bytes.zeroize();
                    return Err(SettingsError::KeyTooShort {
                        path: path.to_path_buf(),
                        length,
                        min_len: SESSION_KEY_MIN_LEN,
                    });
                }
                let key = Key::derive_from(&bytes);
                bytes.zeroize();
                Ok(key)
            }
            Err(error) if mode == BuildMode::Debug || self.session_allow_ephemeral => {
                warn!(
                    path = %path.display(),
                    %error,
                    "using temporary session key; sessions will not survive a restart"
                );
                Ok(Key::generate())
            }
            Err(source) => Err(SettingsError::KeyRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
