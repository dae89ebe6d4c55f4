//! Persistence port for client profiles.
//!
//! Listing and fuzzy search return rows in primary-key order so results are
//! stable between calls.
use crate::modules::clients::domain::entities::{ClientProfile, NewClientProfile};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientProfileRepository: Send + Sync {
    /// Largest identifier suffix ever stored, or 0 for an empty store
    async fn max_sequence(&self) -> AppResult<u64>;

    /// Insert a new profile. A clash on the identifier is reported as `Conflict`.
    async fn insert(&self, profile: NewClientProfile) -> AppResult<ClientProfile>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ClientProfile>>;

    /// Exact, case-sensitive lookup of an identifier such as `C0003`
    async fn find_by_client_id_number(&self, client_id_number: &str)
        -> AppResult<Option<ClientProfile>>;

    /// Profiles whose identifier, first or last name contains `needle`
    /// (case-insensitive), at most `limit` of them
    async fn search_fuzzy(&self, needle: &str, limit: usize) -> AppResult<Vec<ClientProfile>>;

    async fn get_all(&self) -> AppResult<Vec<ClientProfile>>;

    /// Persist the mutable fields of an existing profile
    async fn update(&self, profile: &ClientProfile) -> AppResult<ClientProfile>;

    /// Returns false when no row had that id. Referenced rows yield `Conflict`.
    async fn delete(&self, id: i32) -> AppResult<bool>;
}
