use crate::errors::internal::CredentialError;
use crate::errors::InternalError;

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password and username policy applied whenever a credential is set
///
/// Legacy snapshot imports bypass this, since those passwords were accepted
/// by the old system and their owners still need to log in.
#[derive(Debug, Clone, Copy)]
pub struct PasswordValidatorProvider {
    min_length: usize,
}

impl Default for PasswordValidatorProvider {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordValidatorProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a new password
    ///
    /// # Returns
    /// * `Ok(())` - Password is long enough
    /// * `Err(InternalError)` - PasswordTooShort carrying the minimum length
    pub fn validate(&self, password: &str) -> Result<(), InternalError> {
        if password.chars().count() < self.min_length {
            return Err(CredentialError::PasswordTooShort(self.min_length).into());
        }
        Ok(())
    }

    /// Usernames are trimmed before storage and must not end up empty
    pub fn validate_username<'a>(&self, username: &'a str) -> Result<&'a str, InternalError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(CredentialError::BlankUsername.into());
        }
        Ok(trimmed)
    }
}
