use std::sync::Arc;

use crate::modules::one_time_clients::domain::{
    NewOneTimeClient, OneTimeClient, OneTimeClientRepository, OneTimeClientUpdate,
};
use crate::modules::service_requests::domain::ServiceRequestRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_info, log_warn};

pub struct OneTimeClientService {
    repository: Arc<dyn OneTimeClientRepository>,
    service_requests: Arc<dyn ServiceRequestRepository>,
}

impl OneTimeClientService {
    pub fn new(
        repository: Arc<dyn OneTimeClientRepository>,
        service_requests: Arc<dyn ServiceRequestRepository>,
    ) -> Self {
        Self {
            repository,
            service_requests,
        }
    }

    pub async fn create_client(&self, client: NewOneTimeClient) -> AppResult<OneTimeClient> {
        let created = self.repository.insert(client).await?;
        log_info!(
            "Created one-time client {} ({})",
            created.id,
            created.full_name()
        );
        Ok(created)
    }

    pub async fn get_client(&self, id: i32) -> AppResult<OneTimeClient> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("One-time client not found".to_string()))
    }

    pub async fn get_all_clients(&self) -> AppResult<Vec<OneTimeClient>> {
        self.repository.get_all().await
    }

    pub async fn update_client(
        &self,
        id: i32,
        update: OneTimeClientUpdate,
    ) -> AppResult<OneTimeClient> {
        let update = update.normalized()?;
        let mut client = self.get_client(id).await?;
        client.apply_update(update);
        self.repository.update(&client).await
    }

    pub async fn delete_client(&self, id: i32) -> AppResult<()> {
        let client = self.get_client(id).await?;

        let references = self.service_requests.count_for_one_time_client(id).await?;
        if references > 0 {
            log_warn!(
                "Refusing to delete one-time client {}: {} service request(s) reference it",
                client.id,
                references
            );
            return Err(AppError::Conflict(
                "Cannot delete one-time client with associated service requests. Delete service requests first."
                    .to_string(),
            ));
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("One-time client not found".to_string()));
        }
        log_info!("Deleted one-time client {}", id);
        Ok(())
    }
}
