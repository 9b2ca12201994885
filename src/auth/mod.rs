/*!
 * # Edit Authorization
 *
 * Editing a recorded work order is gated behind a single configured
 * credential pair. A successful check yields an [`EditGrant`], which the
 * update command requires; there is no other way to construct one.
 *
 * The gate is a deterrent against accidental edits, not a security boundary:
 * credentials come from plain configuration and nothing is hashed or
 * rate-limited.
 */

use tracing::{info, warn};

use crate::errors::ServiceError;

pub const DEFAULT_EDIT_USERNAME: &str = "admin";
pub const DEFAULT_EDIT_PASSWORD: &str = "admin";

/// Proof that the edit credentials were checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditGrant {
    _private: (),
}

#[derive(Clone)]
pub struct EditAuthorizer {
    username: String,
    password: String,
}

impl std::fmt::Debug for EditAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditAuthorizer")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for EditAuthorizer {
    fn default() -> Self {
        Self::new(DEFAULT_EDIT_USERNAME, DEFAULT_EDIT_PASSWORD)
    }
}

impl EditAuthorizer {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks a username/password pair. Surrounding whitespace is ignored;
    /// otherwise both must match exactly.
    pub fn authorize(&self, username: &str, password: &str) -> Result<EditGrant, ServiceError> {
        if username.trim() == self.username && password.trim() == self.password {
            info!(username = %username.trim(), "edit access granted");
            Ok(EditGrant { _private: () })
        } else {
            warn!(username = %username.trim(), "edit access denied");
            Err(ServiceError::Unauthorized(
                "invalid username or password".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_credentials_grant_access() {
        let auth = EditAuthorizer::default();
        assert!(auth.authorize("admin", "admin").is_ok());
        assert!(auth.authorize("  admin ", " admin\n").is_ok());
    }

    #[test]
    fn anything_else_is_refused() {
        let auth = EditAuthorizer::new("supervisor", "s3cret");
        for (user, pass) in [("supervisor", "wrong"), ("Supervisor", "s3cret"), ("", "")] {
            assert!(matches!(
                auth.authorize(user, pass),
                Err(ServiceError::Unauthorized(_))
            ));
        }
    }

    #[test]
    fn debug_output_hides_the_password() {
        let rendered = format!("{:?}", EditAuthorizer::new("admin", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
