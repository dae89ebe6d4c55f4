use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::clients::domain::ClientProfileRepository;
use crate::modules::employees::domain::Role;
use crate::modules::one_time_clients::domain::OneTimeClientRepository;
use crate::modules::service_requests::domain::{
    ClientReference, NewServiceRequest, ServiceRequest, ServiceRequestRepository,
    ServiceRequestUpdate, StatusSummary,
};
use crate::shared::domain::Attribution;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_info, log_warn};

pub const UNKNOWN_CLIENT_NAME: &str = "Unknown";

/// A ticket together with the display name of the customer it references.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequestDetails {
    pub request: ServiceRequest,
    pub client_name: String,
}

pub struct ServiceRequestService {
    repository: Arc<dyn ServiceRequestRepository>,
    clients: Arc<dyn ClientProfileRepository>,
    one_time_clients: Arc<dyn OneTimeClientRepository>,
}

impl ServiceRequestService {
    pub fn new(
        repository: Arc<dyn ServiceRequestRepository>,
        clients: Arc<dyn ClientProfileRepository>,
        one_time_clients: Arc<dyn OneTimeClientRepository>,
    ) -> Self {
        Self {
            repository,
            clients,
            one_time_clients,
        }
    }

    /// The referenced customer must exist; `job_type` and `description` are
    /// required, `cost` may not be negative and text must fit its column.
    pub async fn create_request(
        &self,
        mut request: NewServiceRequest,
    ) -> AppResult<ServiceRequestDetails> {
        request.job_type = Validator::required("job_type", Some(&request.job_type))?;
        request.description = Validator::required("description", Some(&request.description))?;
        request.check_widths()?;
        Validator::validate_cost(request.cost)?;

        let client_name = self
            .lookup_client_name(request.client)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;

        let created = self.repository.insert(request).await?;
        log_info!(
            "Created service request {} ({}) for {}",
            created.id,
            created.job_type,
            client_name
        );

        Ok(ServiceRequestDetails {
            request: created,
            client_name,
        })
    }

    pub async fn get_request(&self, id: i32) -> AppResult<ServiceRequestDetails> {
        let request = self.find(id).await?;
        let client_name = self.client_name(request.client).await?;
        Ok(ServiceRequestDetails {
            request,
            client_name,
        })
    }

    pub async fn list_requests(&self) -> AppResult<Vec<ServiceRequestDetails>> {
        let requests = self.repository.get_all().await?;
        self.describe_all(requests).await
    }

    /// Tickets of one client profile.
    pub async fn list_for_client(&self, client_id: i32) -> AppResult<Vec<ServiceRequestDetails>> {
        let requests = self.repository.find_by_client(client_id).await?;
        self.describe_all(requests).await
    }

    /// Hazard flag changes are limited to administrators; `role` is the
    /// caller's self-reported role.
    pub async fn update_request(
        &self,
        id: i32,
        update: ServiceRequestUpdate,
        editor: Attribution,
        role: Option<Role>,
    ) -> AppResult<ServiceRequestDetails> {
        let mut request = self.find(id).await?;

        if update.changes_hazard_flags(&request)
            && !role.is_some_and(|r| r.can_edit_hazard_flags())
        {
            log_warn!(
                "{} tried to change hazard flags on request {} without permission",
                editor.username,
                id
            );
            return Err(AppError::Forbidden(
                "Only administrators can change hazard flags".to_string(),
            ));
        }

        let mut update = update;
        if let Some(job_type) = update.job_type.take() {
            update.job_type = Some(Validator::required("job_type", Some(&job_type))?);
        }
        if let Some(description) = update.description.take() {
            update.description = Some(Validator::required("description", Some(&description))?);
        }
        if let Some(cost) = update.cost {
            Validator::validate_cost(cost)?;
        }
        update.check_widths()?;
        editor.check_widths()?;

        request.apply_update(update, editor);
        let saved = self.repository.update(&request).await?;
        let client_name = self.client_name(saved.client).await?;

        Ok(ServiceRequestDetails {
            request: saved,
            client_name,
        })
    }

    pub async fn delete_request(&self, id: i32) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Service request not found".to_string()));
        }
        log_info!("Deleted service request {}", id);
        Ok(())
    }

    pub async fn summary(&self) -> AppResult<StatusSummary> {
        self.repository.status_summary().await
    }

    async fn find(&self, id: i32) -> AppResult<ServiceRequest> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service request not found".to_string()))
    }

    async fn lookup_client_name(&self, reference: ClientReference) -> AppResult<Option<String>> {
        let name = match reference {
            ClientReference::Profile(id) => self
                .clients
                .find_by_id(id)
                .await?
                .map(|client| client.full_name()),
            ClientReference::OneTime(id) => self
                .one_time_clients
                .find_by_id(id)
                .await?
                .map(|client| client.full_name()),
        };
        Ok(name)
    }

    async fn client_name(&self, reference: ClientReference) -> AppResult<String> {
        Ok(self
            .lookup_client_name(reference)
            .await?
            .unwrap_or_else(|| UNKNOWN_CLIENT_NAME.to_string()))
    }

    async fn describe_all(
        &self,
        requests: Vec<ServiceRequest>,
    ) -> AppResult<Vec<ServiceRequestDetails>> {
        let mut names: HashMap<ClientReference, String> = HashMap::new();
        let mut described = Vec::with_capacity(requests.len());

        for request in requests {
            let client_name = match names.get(&request.client) {
                Some(name) => name.clone(),
                None => {
                    let name = self.client_name(request.client).await?;
                    names.insert(request.client, name.clone());
                    name
                }
            };
            described.push(ServiceRequestDetails {
                request,
                client_name,
            });
        }

        Ok(described)
    }
}
