//! Name and email format rules
use crate::error::PortalError;

/// Maximum length, in characters, for display names and league names.
pub const NAME_MAX_CHARS: usize = 20;

/// Check a display name or league name: 1-20 characters, no leading or
/// trailing whitespace. Both kinds of name share one rule.
///
/// # Errors
///
/// Returns `InvalidName` describing the violated bound.
pub fn name(value: &str) -> Result<(), PortalError> {
    let invalid = |reason| PortalError::InvalidName {
        name: value.to_string(),
        reason,
    };
    if value.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.chars().count() > NAME_MAX_CHARS {
        return Err(invalid("must be at most 20 characters"));
    }
    if value.trim() != value {
        return Err(invalid("must not start or end with whitespace"));
    }
    Ok(())
}

/// Check an email address: non-empty and containing an '@'. Anything
/// stricter is the concern of an outer layer.
///
/// # Errors
///
/// Returns `InvalidEmail` carrying the rejected address.
pub fn email(value: &str) -> Result<(), PortalError> {
    if value.is_empty() || !value.contains('@') {
        return Err(PortalError::InvalidEmail {
            email: value.to_string(),
        });
    }
    Ok(())
}
