use crate::modules::employees::domain::entities::{NewUser, User};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// A taken username is reported as `Conflict`.
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn get_all(&self) -> AppResult<Vec<User>>;

    async fn update(&self, user: &User) -> AppResult<User>;

    async fn delete(&self, id: i32) -> AppResult<bool>;
}
