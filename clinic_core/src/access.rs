//! Password gate in front of the form.
//!
//! A single shared secret is read from the environment at startup. This is a
//! convenience lock for a shared terminal, not an authentication system.

use crate::{Error, Result};
use subtle::ConstantTimeEq;

/// Environment variable holding the secret unless configured otherwise
pub const DEFAULT_SECRET_ENV: &str = "CLINIC_FORM_PASSWORD";

/// Gate holding the configured secret
pub struct AccessGate {
    secret: String,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(Error::Config("Access secret must not be empty".into()));
        }
        Ok(Self { secret })
    }

    /// Read the secret from the named environment variable
    pub fn from_env(var: &str) -> Result<Self> {
        let secret = std::env::var(var)
            .map_err(|_| Error::Config(format!("{} not set in environment", var)))?;
        Self::new(secret)
    }

    /// Exact comparison of `input` against the secret
    pub fn check_access(&self, input: &str) -> bool {
        let granted = self.secret.as_bytes().ct_eq(input.as_bytes()).unwrap_u8() == 1;
        if granted {
            tracing::info!("Access granted");
        } else {
            tracing::warn!("Access denied: incorrect password");
        }
        granted
    }

    /// Like [`AccessGate::check_access`], but as a `Result` for `?` chains
    pub fn require(&self, input: &str) -> Result<()> {
        if self.check_access(input) {
            Ok(())
        } else {
            Err(Error::AccessDenied)
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate").finish_non_exhaustive()
    }
}
