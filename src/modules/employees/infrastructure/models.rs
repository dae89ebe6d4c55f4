use crate::modules::employees::domain::{NewUser, PasswordHash, Role, User};
use crate::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub is_temporary_password: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub is_temporary_password: bool,
}

// Username and creation time are immutable
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub is_temporary_password: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: PasswordHash::from_stored(row.password_hash),
            name: row.name,
            role: row.role,
            is_temporary_password: row.is_temporary_password,
            created_at: row.created_at,
        }
    }
}

impl From<NewUser> for NewUserRow {
    fn from(user: NewUser) -> Self {
        NewUserRow {
            username: user.username,
            password_hash: user.password_hash.as_str().to_string(),
            name: user.name,
            role: user.role,
            is_temporary_password: user.is_temporary_password,
        }
    }
}

impl From<&User> for UserChangeset {
    fn from(user: &User) -> Self {
        UserChangeset {
            password_hash: user.password_hash.as_str().to_string(),
            name: user.name.clone(),
            role: user.role,
            is_temporary_password: user.is_temporary_password,
        }
    }
}
