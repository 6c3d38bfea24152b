//! Password change validation.
//!
//! Checks run locally before anything is sent; a form that fails here never
//! reaches the network.

use serde::Serialize;

/// Minimum number of characters in a new password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Which strength requirements a candidate password meets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PasswordStrength {
    /// At least [`MIN_PASSWORD_LENGTH`] characters.
    pub has_length: bool,
    /// Contains an ASCII uppercase letter.
    pub has_uppercase: bool,
    /// Contains an ASCII lowercase letter.
    pub has_lowercase: bool,
    /// Contains an ASCII digit.
    pub has_number: bool,
}

impl PasswordStrength {
    /// Evaluate `password` against every requirement.
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        Self {
            has_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
        }
    }

    /// Returns `true` if all requirements are met.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.has_length && self.has_uppercase && self.has_lowercase && self.has_number
    }
}

/// Reason a password change form was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PasswordError {
    /// Current password left blank.
    #[display("Please enter your current password")]
    MissingCurrent,
    /// New password left blank.
    #[display("Please enter a new password")]
    MissingNew,
    /// New password fails [`PasswordStrength`].
    #[display("New password does not meet requirements")]
    TooWeak,
    /// Confirmation differs from the new password.
    #[display("New passwords do not match")]
    Mismatch,
    /// New password equals the current one.
    #[display("New password must be different from current password")]
    Unchanged,
}

/// Password change form as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChangeForm {
    /// Current password.
    pub current: String,
    /// Desired password.
    pub new: String,
    /// Desired password, typed again.
    pub confirm: String,
}

impl PasswordChangeForm {
    /// Create a form.
    #[must_use]
    pub fn new(
        current: impl Into<String>,
        new: impl Into<String>,
        confirm: impl Into<String>,
    ) -> Self {
        Self {
            current: current.into(),
            new: new.into(),
            confirm: confirm.into(),
        }
    }

    /// Strength of the new password, for live feedback.
    #[must_use]
    pub fn strength(&self) -> PasswordStrength {
        PasswordStrength::evaluate(&self.new)
    }

    /// Validate the form and produce the request payload.
    ///
    /// # Errors
    ///
    /// Returns the first failed check, in order: current present, new
    /// present, strength, confirmation, change.
    pub fn validate(&self) -> Result<PasswordChange, PasswordError> {
        if self.current.is_empty() {
            return Err(PasswordError::MissingCurrent);
        }
        if self.new.is_empty() {
            return Err(PasswordError::MissingNew);
        }
        if !self.strength().is_valid() {
            return Err(PasswordError::TooWeak);
        }
        if self.new != self.confirm {
            return Err(PasswordError::Mismatch);
        }
        if self.current == self.new {
            return Err(PasswordError::Unchanged);
        }

        Ok(PasswordChange {
            current_password: self.current.clone(),
            new_password: self.new.clone(),
        })
    }
}

/// Body of `PUT /users/{id}/password`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    current_password: String,
    new_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    #[test]
    fn strength_requirements() {
        let strength = PasswordStrength::evaluate("abc");
        check!(
            strength
                == PasswordStrength {
                    has_length: false,
                    has_uppercase: false,
                    has_lowercase: true,
                    has_number: false,
                }
        );
        check!(!strength.is_valid());

        check!(PasswordStrength::evaluate("Secret123").is_valid());
        check!(!PasswordStrength::evaluate("secret123").is_valid());
        check!(!PasswordStrength::evaluate("SECRET123").is_valid());
        check!(!PasswordStrength::evaluate("SecretPass").is_valid());
        check!(!PasswordStrength::evaluate("Sec123").is_valid());
    }

    #[test]
    fn checks_run_in_order() {
        let form = PasswordChangeForm::new("", "", "x");
        check!(form.validate() == Err(PasswordError::MissingCurrent));

        let form = PasswordChangeForm::new("Old12345", "", "");
        check!(form.validate() == Err(PasswordError::MissingNew));

        let form = PasswordChangeForm::new("Old12345", "weak", "other");
        check!(form.validate() == Err(PasswordError::TooWeak));

        let form = PasswordChangeForm::new("Old12345", "New12345", "New12346");
        check!(form.validate() == Err(PasswordError::Mismatch));

        let form = PasswordChangeForm::new("Same1234", "Same1234", "Same1234");
        check!(form.validate() == Err(PasswordError::Unchanged));
    }

    #[test]
    fn messages_are_user_facing() {
        check!(PasswordError::MissingCurrent.to_string() == "Please enter your current password");
        check!(PasswordError::MissingNew.to_string() == "Please enter a new password");
        check!(PasswordError::TooWeak.to_string() == "New password does not meet requirements");
        check!(PasswordError::Mismatch.to_string() == "New passwords do not match");
        check!(
            PasswordError::Unchanged.to_string()
                == "New password must be different from current password"
        );
    }

    #[test]
    fn valid_form_serializes_camel_case() {
        let form = PasswordChangeForm::new("Old12345", "New12345", "New12345");
        let_assert!(Ok(change) = form.validate());

        let value = serde_json::to_value(&change).expect("serialize");
        check!(value == json!({"currentPassword": "Old12345", "newPassword": "New12345"}));
    }

    #[test]
    fn debug_hides_passwords() {
        let form = PasswordChangeForm::new("Old12345", "New12345", "New12345");
        let_assert!(Ok(change) = form.validate());
        check!(!format!("{change:?}").contains("12345"));
    }
}
