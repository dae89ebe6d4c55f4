use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, DbEnum)]
#[serde(rename_all = "snake_case")]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
pub enum Role {
    #[db_rename = "super_admin"]
    SuperAdmin,
    #[db_rename = "admin"]
    Admin,
    #[db_rename = "manager"]
    Manager,
    #[default]
    #[db_rename = "user"]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }

    /// Only administrators may flip the hazard flags on a ticket.
    pub fn can_edit_hazard_flags(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "user" => Ok(Role::User),
            other => Err(AppError::ValidationError(format!("Unknown role '{}'", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_serializes_snake_case() {
        assert_eq!("super_admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn only_admins_edit_hazard_flags() {
        assert!(Role::SuperAdmin.can_edit_hazard_flags());
        assert!(Role::Admin.can_edit_hazard_flags());
        assert!(!Role::Manager.can_edit_hazard_flags());
        assert!(!Role::User.can_edit_hazard_flags());
    }
}
