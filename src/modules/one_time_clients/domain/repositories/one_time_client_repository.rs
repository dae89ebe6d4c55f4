use crate::modules::one_time_clients::domain::entities::{NewOneTimeClient, OneTimeClient};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OneTimeClientRepository: Send + Sync {
    async fn insert(&self, client: NewOneTimeClient) -> AppResult<OneTimeClient>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<OneTimeClient>>;

    async fn get_all(&self) -> AppResult<Vec<OneTimeClient>>;

    async fn update(&self, client: &OneTimeClient) -> AppResult<OneTimeClient>;

    /// Returns false when no row had that id. Referenced rows yield `Conflict`.
    async fn delete(&self, id: i32) -> AppResult<bool>;
}
