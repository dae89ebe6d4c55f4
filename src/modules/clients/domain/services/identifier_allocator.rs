use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::log_debug;
use crate::modules::clients::domain::{
    repositories::ClientProfileRepository,
    value_objects::{ClientIdFormat, ClientIdNumber},
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

/// Hands out sequential client identifiers (`C0001`, `C0002`, ...).
///
/// Allocation is serialized through a mutex-guarded high-water mark owned by
/// the allocator. The mark is seeded from the store's largest suffix on first
/// use and re-seeded whenever a write reports that an identifier already
/// exists, which covers other processes writing to the same database. Values
/// are strictly increasing in allocation order; gaps are allowed.
pub struct ClientIdAllocator {
    repository: Arc<dyn ClientProfileRepository>,
    format: ClientIdFormat,
    max_attempts: u32,
    high_water: Mutex<HighWaterMark>,
}

#[derive(Debug)]
struct HighWaterMark {
    last: u64,
    /// When set, the store is consulted before the next allocation.
    stale: bool,
}

impl ClientIdAllocator {
    pub fn new(
        repository: Arc<dyn ClientProfileRepository>,
        format: ClientIdFormat,
        max_attempts: u32,
    ) -> Self {
        Self {
            repository,
            format,
            max_attempts: max_attempts.max(1),
            high_water: Mutex::new(HighWaterMark {
                last: 0,
                stale: true,
            }),
        }
    }

    pub fn format(&self) -> &ClientIdFormat {
        &self.format
    }

    /// Reserve the next identifier.
    pub async fn allocate(&self) -> AppResult<ClientIdNumber> {
        let mut mark = self.high_water.lock().await;

        if mark.stale {
            let stored = self
                .repository
                .max_sequence()
                .await
                .map_err(|e| match e {
                    AppError::StoreUnavailable(_) => e,
                    other => AppError::StoreUnavailable(format!(
                        "Could not read client identifier high-water mark: {}",
                        other
                    )),
                })?;
            mark.last = mark.last.max(stored);
            mark.stale = false;
        }

        let next = mark.last.checked_add(1).ok_or_else(|| {
            AppError::StoreUnavailable("Client identifier space exhausted".to_string())
        })?;
        mark.last = next;

        let id = self.format.format(next);
        log_debug!("Allocated client identifier {}", id);
        Ok(id)
    }

    /// Force the next allocation to re-read the store's largest suffix.
    pub async fn resync(&self) {
        self.high_water.lock().await.stale = true;
    }

    /// Allocate an identifier and hand it to `persist`. When `persist` reports
    /// a `Conflict` the mark is re-seeded and a fresh identifier is tried, up
    /// to the configured number of attempts. Other errors propagate unchanged.
    pub async fn allocate_with<T, F, Fut>(&self, mut persist: F) -> AppResult<T>
    where
        F: FnMut(ClientIdNumber) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        for attempt in 1..=self.max_attempts {
            let id = self.allocate().await?;

            match persist(id).await {
                Ok(value) => return Ok(value),
                Err(AppError::Conflict(reason)) => {
                    LogContext::allocation_retry(attempt, self.max_attempts, &reason);
                    self.resync().await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::StoreUnavailable(format!(
            "Could not allocate a unique client identifier after {} attempts",
            self.max_attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::clients::domain::repositories::MockClientProfileRepository;
    use crate::modules::clients::domain::ClientProfileDraft;
    use crate::shared::domain::Attribution;
    use crate::shared::testing::InMemoryClientProfiles;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn allocator_over(repo: Arc<dyn ClientProfileRepository>) -> ClientIdAllocator {
        ClientIdAllocator::new(repo, ClientIdFormat::default(), 3)
    }

    fn draft(first: &str, last: &str) -> ClientProfileDraft {
        ClientProfileDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: "555-0100".to_string(),
            created_by: Attribution::new("user1", "Regular User"),
        }
    }

    #[tokio::test]
    async fn empty_store_starts_at_one() {
        let allocator = allocator_over(Arc::new(InMemoryClientProfiles::new()));
        let id = allocator.allocate().await.unwrap();
        assert_eq!(id.as_str(), "C0001");
    }

    #[tokio::test]
    async fn continues_after_largest_stored_suffix() {
        let mut repo = MockClientProfileRepository::new();
        repo.expect_max_sequence().times(1).returning(|| Ok(7));

        let allocator = allocator_over(Arc::new(repo));
        assert_eq!(allocator.allocate().await.unwrap().as_str(), "C0008");
        // The store is read once; later allocations use the in-memory mark.
        assert_eq!(allocator.allocate().await.unwrap().as_str(), "C0009");
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_store_unavailable() {
        let mut repo = MockClientProfileRepository::new();
        repo.expect_max_sequence()
            .returning(|| Err(AppError::InternalError("connection reset".to_string())));

        let allocator = allocator_over(Arc::new(repo));
        let err = allocator.allocate().await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creations_get_distinct_identifiers() {
        let repo = Arc::new(InMemoryClientProfiles::new());
        let allocator = Arc::new(allocator_over(repo.clone()));

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let allocator = Arc::clone(&allocator);
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    let draft = draft(&format!("First{i}"), "Concurrent");
                    allocator
                        .allocate_with(|id| {
                            let repo = Arc::clone(&repo);
                            let new_profile = draft.with_identifier(id);
                            async move { repo.insert(new_profile).await }
                        })
                        .await
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in futures::future::join_all(handles).await {
            let profile = handle.unwrap().unwrap();
            ids.insert(profile.client_id_number.as_str().to_string());
        }

        assert_eq!(ids.len(), 64);
        assert_eq!(repo.get_all().await.unwrap().len(), 64);
    }

    #[tokio::test]
    async fn conflict_from_another_writer_triggers_reseed() {
        let repo = Arc::new(InMemoryClientProfiles::new());
        let allocator = allocator_over(repo.clone());

        // The mark sits at 1 while a second process stores C0001 and C0002.
        assert_eq!(allocator.allocate().await.unwrap().as_str(), "C0001");
        repo.insert(draft("Other", "Writer").with_identifier(ClientIdFormat::default().format(1)))
            .await
            .unwrap();
        repo.insert(draft("Other", "Writer").with_identifier(ClientIdFormat::default().format(2)))
            .await
            .unwrap();

        let created = allocator
            .allocate_with(|id| {
                let repo = Arc::clone(&repo);
                let new_profile = draft("Ann", "Smith").with_identifier(id);
                async move { repo.insert(new_profile).await }
            })
            .await
            .unwrap();

        assert_eq!(created.client_id_number.as_str(), "C0003");
    }

    #[tokio::test]
    async fn retry_budget_is_bounded() {
        let allocator = allocator_over(Arc::new(InMemoryClientProfiles::new()));
        let attempts = AtomicU32::new(0);

        let result: AppResult<()> = allocator
            .allocate_with(|_| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(AppError::Conflict("duplicate".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_conflict_errors_are_not_retried() {
        let allocator = allocator_over(Arc::new(InMemoryClientProfiles::new()));
        let attempts = AtomicU32::new(0);

        let result: AppResult<()> = allocator
            .allocate_with(|_| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(AppError::StoreUnavailable("down".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn identifiers_widen_past_padding() {
        let mut repo = MockClientProfileRepository::new();
        repo.expect_max_sequence().returning(|| Ok(9_999));

        let allocator = allocator_over(Arc::new(repo));
        assert_eq!(allocator.allocate().await.unwrap().as_str(), "C10000");
    }
}
