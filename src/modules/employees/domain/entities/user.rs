use chrono::{DateTime, Utc};

use crate::modules::employees::domain::value_objects::{PasswordHash, Role};

/// An employee account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: PasswordHash,
    pub name: String,
    pub role: Role,
    pub is_temporary_password: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: PasswordHash,
    pub name: String,
    pub role: Role,
    pub is_temporary_password: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub role: Option<Role>,
}

impl User {
    pub fn check_password(&self, password: &str) -> bool {
        self.password_hash.verify(password)
    }

    pub fn set_password(&mut self, password: &str, is_temporary: bool) {
        self.password_hash = PasswordHash::generate(password);
        self.is_temporary_password = is_temporary;
    }

    pub fn apply_update(&mut self, update: EmployeeUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
    }
}
