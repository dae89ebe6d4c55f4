use serde::{Deserialize, Serialize};

use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

pub const SYSTEM_USERNAME: &str = "system";
pub const SYSTEM_DISPLAY_NAME: &str = "System";

/// Widths of the `*_by` and `*_by_name` columns.
pub const USERNAME_MAX: usize = 80;
pub const DISPLAY_NAME_MAX: usize = 120;

/// Who performed a change: login name plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub username: String,
    pub display_name: String,
}

impl Attribution {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
        }
    }

    pub fn system() -> Self {
        Self::new(SYSTEM_USERNAME, SYSTEM_DISPLAY_NAME)
    }

    /// Build from optional request fields. A missing username falls back to
    /// `system`; a missing display name falls back to the username. Values
    /// wider than their columns are a `ValidationError`.
    pub fn from_request(username: Option<&str>, display_name: Option<&str>) -> AppResult<Self> {
        let username = username
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(SYSTEM_USERNAME)
            .to_string();
        let display_name = display_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if username == SYSTEM_USERNAME {
                    SYSTEM_DISPLAY_NAME.to_string()
                } else {
                    username.clone()
                }
            });
        let who = Self {
            username,
            display_name,
        };
        who.check_widths()?;
        Ok(who)
    }

    pub fn check_widths(&self) -> AppResult<()> {
        Validator::validate_max_length("username", &self.username, USERNAME_MAX)?;
        Validator::validate_max_length("display name", &self.display_name, DISPLAY_NAME_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;

    #[test]
    fn falls_back_to_system() {
        let who = Attribution::from_request(None, None).unwrap();
        assert_eq!(who, Attribution::new("system", "System"));
    }

    #[test]
    fn display_name_defaults_to_username() {
        let who = Attribution::from_request(Some(" user1 "), Some("")).unwrap();
        assert_eq!(who, Attribution::new("user1", "user1"));
    }

    #[test]
    fn rejects_values_wider_than_their_columns() {
        let long_user = "u".repeat(USERNAME_MAX + 1);
        assert!(matches!(
            Attribution::from_request(Some(&long_user), Some("Driver")),
            Err(AppError::ValidationError(_))
        ));

        let long_name = "n".repeat(DISPLAY_NAME_MAX + 1);
        assert!(matches!(
            Attribution::from_request(Some("user1"), Some(&long_name)),
            Err(AppError::ValidationError(_))
        ));

        let widest = Attribution::from_request(
            Some(&"u".repeat(USERNAME_MAX)),
            Some(&"n".repeat(DISPLAY_NAME_MAX)),
        );
        assert!(widest.is_ok());
    }
}
