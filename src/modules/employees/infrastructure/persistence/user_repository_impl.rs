use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::modules::employees::domain::{NewUser, User, UserRepository};
use crate::modules::employees::infrastructure::models::{NewUserRow, UserChangeset, UserRow};
use crate::schema::users;
use crate::shared::errors::AppResult;
use crate::shared::Database;

pub struct UserRepositoryImpl {
    db: Arc<Database>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let row = NewUserRow::from(user);
        self.db
            .with_connection(move |conn| {
                let stored = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserRow::as_returning())
                    .get_result::<UserRow>(conn)?;
                Ok(stored.into())
            })
            .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        self.db
            .with_connection(move |conn| {
                let row = users::table
                    .find(id)
                    .select(UserRow::as_select())
                    .first::<UserRow>(conn)
                    .optional()?;
                Ok(row.map(User::from))
            })
            .await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let username = username.to_string();
        self.db
            .with_connection(move |conn| {
                let row = users::table
                    .filter(users::username.eq(&username))
                    .select(UserRow::as_select())
                    .first::<UserRow>(conn)
                    .optional()?;
                Ok(row.map(User::from))
            })
            .await
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        self.db
            .with_connection(|conn| {
                let rows = users::table
                    .order(users::id.asc())
                    .select(UserRow::as_select())
                    .load::<UserRow>(conn)?;
                Ok(rows.into_iter().map(User::from).collect())
            })
            .await
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let id = user.id;
        let changes = UserChangeset::from(user);
        self.db
            .with_connection(move |conn| {
                let row = diesel::update(users::table.find(id))
                    .set(&changes)
                    .returning(UserRow::as_returning())
                    .get_result::<UserRow>(conn)?;
                Ok(row.into())
            })
            .await
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.db
            .with_connection(move |conn| {
                let deleted = diesel::delete(users::table.find(id)).execute(conn)?;
                Ok(deleted > 0)
            })
            .await
    }
}
