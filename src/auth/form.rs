//! Login/signup form validation.
//!
//! All failing fields are reported together so the UI can flag every input at once.
//! Only a fully valid form turns into an [`AuthRequest`].

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::validator::{is_email, min_length, pass_match};

pub const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(ToSchema, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(ToSchema, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthField {
    Email,
    Password,
    Password2,
}

impl AuthField {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Email => "Please provide a valid email",
            Self::Password => "Password must be at least 8 characters",
            Self::Password2 => "Passwords must match",
        }
    }
}

pub type FieldErrors = BTreeMap<AuthField, &'static str>;

/// Raw form input as submitted by the UI.
#[derive(ToSchema, Deserialize)]
pub struct AuthForm {
    #[serde(default)]
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    /// Confirmation, only read in signup mode.
    #[serde(default)]
    pub password2: Option<String>,
}

impl std::fmt::Debug for AuthForm {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AuthForm")
            .field("mode", &self.mode)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// A validated request for the authentication collaborator.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub mode: AuthMode,
    pub payload: Credentials,
}

impl AuthForm {
    /// Validate the form.
    ///
    /// # Errors
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<AuthRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        if !is_email(&self.email) {
            errors.insert(AuthField::Email, AuthField::Email.message());
        }
        if !min_length(self.password.trim(), PASSWORD_MIN_LENGTH) {
            errors.insert(AuthField::Password, AuthField::Password.message());
        }
        if self.mode == AuthMode::Signup
            && !pass_match(&self.password, self.password2.as_deref().unwrap_or_default())
        {
            errors.insert(AuthField::Password2, AuthField::Password2.message());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(AuthRequest {
            mode: self.mode,
            payload: Credentials {
                email: self.email.clone(),
                password: SecretString::from(self.password.clone()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn form(mode: AuthMode, email: &str, password: &str, password2: Option<&str>) -> AuthForm {
        AuthForm {
            mode,
            email: email.to_string(),
            password: password.to_string(),
            password2: password2.map(str::to_string),
        }
    }

    #[test]
    fn valid_login_builds_request() {
        let request = form(AuthMode::Login, "jo@example.com", "correct horse", None).validate();
        let Ok(request) = request else {
            panic!("expected a valid login form");
        };
        assert_eq!(request.mode, AuthMode::Login);
        assert_eq!(request.payload.email, "jo@example.com");
        assert_eq!(request.payload.password.expose_secret(), "correct horse");
    }

    #[test]
    fn login_ignores_confirmation() {
        let result = form(AuthMode::Login, "jo@example.com", "password1", Some("other")).validate();
        assert!(result.is_ok());
    }

    #[test]
    fn reports_every_failing_field() {
        let result = form(AuthMode::Signup, "nope", "short", Some("different")).validate();
        let Err(errors) = result else {
            panic!("expected field errors");
        };
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec![AuthField::Email, AuthField::Password, AuthField::Password2]
        );
        assert_eq!(
            errors.get(&AuthField::Password),
            Some(&"Password must be at least 8 characters")
        );
    }

    #[test]
    fn password_length_ignores_surrounding_whitespace() {
        let result = form(AuthMode::Login, "jo@example.com", "  1234567  ", None).validate();
        assert!(matches!(result, Err(errors) if errors.contains_key(&AuthField::Password)));
    }

    #[test]
    fn signup_requires_matching_confirmation() {
        let missing = form(AuthMode::Signup, "jo@example.com", "password1", None).validate();
        assert!(matches!(missing, Err(errors) if errors.len() == 1 && errors.contains_key(&AuthField::Password2)));

        let ok = form(AuthMode::Signup, "jo@example.com", "password1", Some("password1")).validate();
        assert!(ok.is_ok());
    }

    #[test]
    fn field_errors_serialize_by_field_name() -> Result<(), serde_json::Error> {
        let mut errors = FieldErrors::new();
        errors.insert(AuthField::Password2, AuthField::Password2.message());
        let value = serde_json::to_value(&errors)?;
        assert_eq!(value["password2"], "Passwords must match");
        Ok(())
    }

    #[test]
    fn debug_output_hides_passwords() {
        let rendered = format!(
            "{:?}",
            form(AuthMode::Signup, "jo@example.com", "s3cret-pass", Some("s3cret-pass"))
        );
        assert!(!rendered.contains("s3cret-pass"));
    }
}
