//! Admin identity.
//!
//! Content-management commands need a [`Session`], which only an
//! [`IdentityProvider`] can hand out. The default provider checks the
//! `[admin]` section of the config file, where the password is kept as a
//! SHA-256 hex digest.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::app::{Result, SajadahError};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    /// Hex SHA-256 of the admin password. Without it nobody can log in.
    pub password_sha256: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password_sha256: None,
        }
    }
}

/// An authenticated admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

pub trait IdentityProvider {
    fn verify(&self, username: &str, password: &str) -> Result<Session>;
}

pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Verifies against the username and password digest from the config file.
#[derive(Debug, Clone)]
pub struct ConfigIdentity {
    username: String,
    password_sha256: Option<String>,
}

impl ConfigIdentity {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            username: config.username.clone(),
            password_sha256: config
                .password_sha256
                .as_ref()
                .map(|h| h.trim().to_ascii_lowercase()),
        }
    }
}

impl IdentityProvider for ConfigIdentity {
    fn verify(&self, username: &str, password: &str) -> Result<Session> {
        let expected = self.password_sha256.as_deref().ok_or_else(|| {
            SajadahError::Unauthorized(
                "no admin password configured; set [admin].password_sha256".into(),
            )
        })?;

        if username != self.username || hash_password(password) != expected {
            tracing::warn!("Rejected admin login for '{}'", username);
            return Err(SajadahError::Unauthorized(
                "invalid username or password".into(),
            ));
        }

        tracing::info!("Admin '{}' logged in", username);
        Ok(Session {
            username: username.to_string(),
            started_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(password: &str) -> ConfigIdentity {
        ConfigIdentity::new(&AdminConfig {
            username: "pengurus".into(),
            password_sha256: Some(hash_password(password)),
        })
    }

    #[test]
    fn test_hash_password_is_sha256_hex() {
        let digest = hash_password("rahasia");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hash_password("rahasia"));
        assert_ne!(digest, hash_password("Rahasia"));
    }

    #[test]
    fn test_verify_accepts_matching_credentials() {
        let session = identity("rahasia").verify("pengurus", "rahasia").unwrap();
        assert_eq!(session.username(), "pengurus");
    }

    #[test]
    fn test_verify_rejects_wrong_password_or_user() {
        let id = identity("rahasia");
        assert!(matches!(
            id.verify("pengurus", "salah"),
            Err(SajadahError::Unauthorized(_))
        ));
        assert!(matches!(
            id.verify("admin", "rahasia"),
            Err(SajadahError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_verify_without_configured_password() {
        let id = ConfigIdentity::new(&AdminConfig::default());
        assert!(matches!(
            id.verify("admin", "admin1"),
            Err(SajadahError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_configured_digest_is_case_insensitive() {
        let id = ConfigIdentity::new(&AdminConfig {
            username: "admin".into(),
            password_sha256: Some(hash_password("rahasia").to_uppercase()),
        });
        assert!(id.verify("admin", "rahasia").is_ok());
    }
}
