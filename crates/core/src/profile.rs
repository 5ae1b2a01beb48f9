//! Profile username rules.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 32;

/// Request body for changing the caller's display username.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUsername {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
}

impl UpdateUsername {
    /// Trim, check length and character set, and return the stored form.
    pub fn normalized(&self) -> Result<String, CoreError> {
        let candidate = UpdateUsername {
            username: self.username.trim().to_string(),
        };
        candidate
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        if let Some(bad) = candidate.username.chars().find(|c| !is_username_char(*c)) {
            return Err(CoreError::Validation(format!(
                "username may not contain '{bad}'"
            )));
        }
        Ok(candidate.username)
    }
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Username assigned on sign-up: the email's local part, reduced to allowed
/// characters and padded or cut to fit the length bounds.
pub fn default_username(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut name: String = local
        .chars()
        .filter(|c| is_username_char(*c))
        .take(USERNAME_MAX_LEN)
        .collect();
    if name.len() < USERNAME_MIN_LEN {
        name = format!("user{name}");
    }
    name
}

/// `base` with a numeric suffix, cut so the result still fits.
pub fn suffixed_username(base: &str, suffix: i64) -> String {
    let suffix = suffix.to_string();
    let keep = USERNAME_MAX_LEN.saturating_sub(suffix.len() + 1);
    let head: String = base.chars().take(keep).collect();
    format!("{head}-{suffix}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn update(username: &str) -> UpdateUsername {
        UpdateUsername {
            username: username.to_string(),
        }
    }

    #[test]
    fn default_username_is_email_local_part() {
        assert_eq!(default_username("jon.jones@example.com"), "jon.jones");
    }

    #[test]
    fn default_username_strips_disallowed_characters() {
        assert_eq!(default_username("izzy+picks@example.com"), "izzypicks");
    }

    #[test]
    fn default_username_is_padded_when_short() {
        assert_eq!(default_username("al@example.com"), "useral");
        assert_eq!(default_username("@example.com"), "user");
    }

    #[test]
    fn default_username_is_cut_to_max_length() {
        let email = format!("{}@example.com", "x".repeat(60));
        assert_eq!(default_username(&email).len(), USERNAME_MAX_LEN);
    }

    #[test]
    fn suffix_fits_within_max_length() {
        let long = "y".repeat(USERNAME_MAX_LEN);
        let name = suffixed_username(&long, 12345);
        assert_eq!(name.len(), USERNAME_MAX_LEN);
        assert!(name.ends_with("-12345"));
        assert_eq!(suffixed_username("alex", 2), "alex-2");
    }

    #[test]
    fn normalized_trims_whitespace() {
        assert_eq!(update("  poatan ").normalized().unwrap(), "poatan");
    }

    #[test]
    fn normalized_rejects_bad_lengths() {
        assert_matches!(update("ab").normalized(), Err(CoreError::Validation(_)));
        assert_matches!(
            update(&"z".repeat(USERNAME_MAX_LEN + 1)).normalized(),
            Err(CoreError::Validation(_))
        );
        assert_matches!(update("   ").normalized(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn normalized_rejects_bad_characters() {
        assert_matches!(
            update("no spaces").normalized(),
            Err(CoreError::Validation(msg)) if msg.contains("' '")
        );
    }
}
