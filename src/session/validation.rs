//! Field-validation rules run before any backend call.
//!
//! Each rule is a pure function returning `Ok(())` on success or a
//! specific [`ValidationError`] on failure. A rejected form never reaches
//! the Identity Gateway or the Profile Store.

use crate::session::error::ValidationError;

/// Validates that an email address is present and well-formed.
///
/// Well-formed here means a single `@` separating a non-empty local part
/// from a domain that contains an interior dot, with no whitespace
/// anywhere. Full RFC 5321 parsing is the gateway's job; this rule only
/// catches obvious typos before a round trip.
///
/// # Errors
///
/// Returns [`ValidationError::MissingEmail`] for an empty string and
/// [`ValidationError::MalformedEmail`] for anything that does not look
/// like an address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::MalformedEmail(email.to_owned()));
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::MalformedEmail(email.to_owned()));
    };

    let domain_ok =
        domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.');
    if local.is_empty() || !domain_ok {
        return Err(ValidationError::MalformedEmail(email.to_owned()));
    }

    Ok(())
}

/// Validates that a password is present.
///
/// Strength is the gateway's concern ([`CredentialPolicy`]); locally only
/// presence is checked.
///
/// # Errors
///
/// Returns [`ValidationError::MissingPassword`] for an empty password.
///
/// [`CredentialPolicy`]: crate::session::ports::CredentialPolicy
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}

/// Validates the login form fields.
///
/// # Errors
///
/// Returns the first failing rule: email presence and shape, then
/// password presence.
pub fn validate_login_fields(email: &str, password: &str) -> Result<(), ValidationError> {
    validate_email(email)?;
    validate_password(password)
}

/// Validates the registration form fields.
///
/// The username is checked first: registration without a username is
/// rejected before anything else is inspected.
///
/// # Errors
///
/// Returns [`ValidationError::MissingUsername`] for an empty or
/// whitespace-only username, then the login-field rules.
pub fn validate_registration_fields(
    email: &str,
    password: &str,
    username: &str,
) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    validate_login_fields(email, password)
}
