use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::constants::{ADMIN_ROLE, users};
use crate::error::{GraylogError, Result};

/// A Graylog account as exchanged with `/users`.
///
/// Graylog returns many more fields than these; they are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub email: String,

    pub full_name: String,

    /// Only ever sent; Graylog does not return it.
    pub password: String,

    pub permissions: Vec<String>,

    pub roles: Vec<String>,

    pub username: String,
}

impl User {
    /// Record for a new admin account with a freshly generated password.
    pub fn new_admin(name: &str, email_domain: &str) -> Result<Self> {
        Ok(Self {
            email: format!("{name}@{email_domain}"),
            full_name: name.to_string(),
            password: generate_password()?,
            permissions: vec![],
            roles: vec![ADMIN_ROLE.to_string()],
            username: name.to_string(),
        })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }

    /// Adds the Admin role unless it is already present.
    /// Returns whether the roles changed.
    pub fn grant_admin(&mut self) -> bool {
        if self.is_admin() {
            return false;
        }

        self.roles.push(ADMIN_ROLE.to_string());
        true
    }
}

/// URL-safe base64 of 30 bytes from the OS CSPRNG.
///
/// Fails rather than falling back to a weaker source.
pub fn generate_password() -> Result<String> {
    let mut bytes = [0u8; users::PASSWORD_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| GraylogError::Password(Box::new(e)))?;

    Ok(URL_SAFE.encode(bytes))
}
