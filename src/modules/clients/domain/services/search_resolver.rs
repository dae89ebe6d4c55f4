use std::sync::Arc;

use crate::modules::clients::domain::{
    entities::ClientProfile, repositories::ClientProfileRepository,
    value_objects::ClientSearchQuery,
};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;

/// Two-tier client lookup.
///
/// 1. If the uppercased query is exactly some profile's identifier, that
///    profile alone is returned and the limit is ignored.
/// 2. Otherwise profiles whose identifier, first or last name contain the
///    query are returned in primary-key order, at most `limit` of them.
pub struct ClientSearchResolver {
    repository: Arc<dyn ClientProfileRepository>,
    default_limit: usize,
}

impl ClientSearchResolver {
    pub fn new(repository: Arc<dyn ClientProfileRepository>, default_limit: usize) -> Self {
        Self {
            repository,
            default_limit,
        }
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Validate `query`/`limit` and run the search.
    pub async fn search(&self, query: &str, limit: Option<i64>) -> AppResult<Vec<ClientProfile>> {
        let query = ClientSearchQuery::new(query, limit, self.default_limit)?;
        self.resolve(&query).await
    }

    pub async fn resolve(&self, query: &ClientSearchQuery) -> AppResult<Vec<ClientProfile>> {
        let candidate = query.as_client_id_number();
        if let Some(profile) = self
            .repository
            .find_by_client_id_number(&candidate)
            .await?
        {
            LogContext::search_operation(query.needle(), Some("exact"), Some(1));
            return Ok(vec![profile]);
        }

        let mut matches = self
            .repository
            .search_fuzzy(query.needle(), query.limit())
            .await?;
        matches.truncate(query.limit());

        LogContext::search_operation(query.needle(), Some("fuzzy"), Some(matches.len()));
        Ok(matches)
    }
}
