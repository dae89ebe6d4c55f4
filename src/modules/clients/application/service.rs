use std::sync::Arc;

use crate::modules::clients::domain::{
    ClientIdAllocator, ClientIdFormat, ClientProfile, ClientProfileDraft, ClientProfileRepository,
    ClientProfileUpdate, ClientSearchQuery, ClientSearchResolver,
};
use crate::modules::service_requests::domain::ServiceRequestRepository;
use crate::shared::config::ClientIdSettings;
use crate::shared::domain::Attribution;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::TimedOperation;
use crate::{log_info, log_warn};

/// Client profile use cases: creation through the identifier allocator,
/// two-tier search, partial updates and guarded deletion.
pub struct ClientProfileService {
    repository: Arc<dyn ClientProfileRepository>,
    service_requests: Arc<dyn ServiceRequestRepository>,
    allocator: ClientIdAllocator,
    resolver: ClientSearchResolver,
}

impl ClientProfileService {
    pub fn new(
        repository: Arc<dyn ClientProfileRepository>,
        service_requests: Arc<dyn ServiceRequestRepository>,
        settings: &ClientIdSettings,
    ) -> Self {
        let allocator = ClientIdAllocator::new(
            Arc::clone(&repository),
            ClientIdFormat::from_settings(settings),
            settings.max_attempts,
        );
        let resolver =
            ClientSearchResolver::new(Arc::clone(&repository), settings.search_default_limit);

        Self {
            repository,
            service_requests,
            allocator,
            resolver,
        }
    }

    pub async fn create_client(&self, draft: ClientProfileDraft) -> AppResult<ClientProfile> {
        let timer = TimedOperation::new("create_client", "client_profiles");

        let repository = Arc::clone(&self.repository);
        let profile = self
            .allocator
            .allocate_with(|id| {
                let repository = Arc::clone(&repository);
                let new_profile = draft.with_identifier(id);
                async move { repository.insert(new_profile).await }
            })
            .await?;

        timer.finish();
        log_info!(
            "Created client {} ({}) by {}",
            profile.client_id_number,
            profile.full_name(),
            profile.created_by.username
        );
        Ok(profile)
    }

    pub async fn get_client(&self, id: i32) -> AppResult<ClientProfile> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".to_string()))
    }

    pub async fn get_all_clients(&self) -> AppResult<Vec<ClientProfile>> {
        self.repository.get_all().await
    }

    /// Raw query-string values are validated here so bad input is a 400.
    pub async fn search_clients(
        &self,
        query: Option<&str>,
        limit: Option<&str>,
    ) -> AppResult<Vec<ClientProfile>> {
        let query = ClientSearchQuery::from_raw(query, limit, self.resolver.default_limit())?;
        self.resolver.resolve(&query).await
    }

    pub async fn update_client(
        &self,
        id: i32,
        update: ClientProfileUpdate,
        editor: Attribution,
    ) -> AppResult<ClientProfile> {
        let update = update.normalized()?;
        editor.check_widths()?;
        let mut profile = self.get_client(id).await?;

        profile.apply_update(update, editor);
        let saved = self.repository.update(&profile).await?;

        log_info!(
            "Updated client {} by {}",
            saved.client_id_number,
            saved.last_edited_by.username
        );
        Ok(saved)
    }

    /// Refuses with `Conflict` while service requests still reference the
    /// profile. The foreign key enforces the same rule for racing writers.
    pub async fn delete_client(&self, id: i32) -> AppResult<()> {
        let profile = self.get_client(id).await?;

        let references = self.service_requests.count_for_client(id).await?;
        if references > 0 {
            log_warn!(
                "Refusing to delete client {}: {} service request(s) reference it",
                profile.client_id_number,
                references
            );
            return Err(AppError::Conflict(format!(
                "Client {} has {} service request(s) and cannot be deleted",
                profile.client_id_number, references
            )));
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Client not found".to_string()));
        }

        log_info!("Deleted client {}", profile.client_id_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::service_requests::domain::{
        ClientReference, NewServiceRequest, ServicePriority, ServiceStatus, VehicleDetails,
    };
    use crate::shared::testing::{InMemoryClientProfiles, InMemoryServiceRequests};
    use chrono::Utc;

    struct Fixture {
        service: ClientProfileService,
        profiles: Arc<InMemoryClientProfiles>,
        requests: Arc<InMemoryServiceRequests>,
    }

    fn fixture() -> Fixture {
        let profiles = Arc::new(InMemoryClientProfiles::new());
        let requests = Arc::new(InMemoryServiceRequests::new());
        let service = ClientProfileService::new(
            profiles.clone(),
            requests.clone(),
            &ClientIdSettings::default(),
        );
        Fixture {
            service,
            profiles,
            requests,
        }
    }

    fn draft(first: &str, last: &str) -> ClientProfileDraft {
        ClientProfileDraft::new(
            Some(first),
            Some(last),
            Some("555-0100"),
            Attribution::new("user1", "Regular User"),
        )
        .unwrap()
    }

    fn ticket_for(client: ClientReference) -> NewServiceRequest {
        NewServiceRequest {
            client,
            vehicle: VehicleDetails::default(),
            is_dangerous: false,
            has_heavy_traffic: false,
            job_type: "Tow".to_string(),
            description: "Engine failure".to_string(),
            priority: ServicePriority::default(),
            status: ServiceStatus::default(),
            assigned_to: None,
            assigned_to_name: None,
            requested_date: Utc::now(),
            completion_date: None,
            cost: 0.0,
            notes: None,
            created_by: Attribution::system(),
        }
    }

    #[tokio::test]
    async fn creation_assigns_sequential_identifiers() {
        let f = fixture();
        let first = f.service.create_client(draft("Ann", "Smith")).await.unwrap();
        let second = f.service.create_client(draft("Bob", "Jones")).await.unwrap();

        assert_eq!(first.client_id_number.as_str(), "C0001");
        assert_eq!(second.client_id_number.as_str(), "C0002");
        assert_eq!(first.last_edited_by, first.created_by);
    }

    #[tokio::test]
    async fn over_wide_editor_is_rejected() {
        let f = fixture();
        let created = f.service.create_client(draft("Ann", "Smith")).await.unwrap();

        let err = f
            .service
            .update_client(
                created.id,
                ClientProfileUpdate {
                    phone: Some("555-0199".to_string()),
                    ..Default::default()
                },
                Attribution::new("e".repeat(81), "Editor"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(f.service.get_client(created.id).await.unwrap().phone, "555-0100");

        let too_wide = ClientProfileDraft::new(
            Some("Ann"),
            Some("Smith"),
            Some("555-0100"),
            Attribution::new("user1", "N".repeat(121)),
        );
        assert!(matches!(too_wide, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn missing_client_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.service.get_client(42).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_keeps_identifier_and_stamps_editor() {
        let f = fixture();
        let created = f.service.create_client(draft("Ann", "Smith")).await.unwrap();

        let updated = f
            .service
            .update_client(
                created.id,
                ClientProfileUpdate {
                    last_name: Some(" Smythe ".to_string()),
                    ..Default::default()
                },
                Attribution::new("admin1", "Admin User"),
            )
            .await
            .unwrap();

        assert_eq!(updated.client_id_number, created.client_id_number);
        assert_eq!(updated.last_name, "Smythe");
        assert_eq!(updated.first_name, "Ann");
        assert_eq!(updated.last_edited_by.display_name, "Admin User");
        assert_eq!(updated.created_by.username, "user1");
    }

    #[tokio::test]
    async fn referenced_profile_cannot_be_deleted() {
        let f = fixture();
        let created = f.service.create_client(draft("Ann", "Smith")).await.unwrap();
        f.requests
            .insert(ticket_for(ClientReference::Profile(created.id)))
            .await
            .unwrap();

        let err = f.service.delete_client(created.id).await.unwrap_err();
        assert!(err.is_conflict());

        // Both records are intact.
        assert!(f.profiles.find_by_id(created.id).await.unwrap().is_some());
        assert_eq!(f.requests.count_for_client(created.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unreferenced_profile_is_deleted() {
        let f = fixture();
        let created = f.service.create_client(draft("Ann", "Smith")).await.unwrap();

        f.service.delete_client(created.id).await.unwrap();
        assert!(f.service.get_all_clients().await.unwrap().is_empty());
        assert!(matches!(
            f.service.delete_client(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn search_validates_raw_parameters() {
        let f = fixture();
        f.service.create_client(draft("Ann", "Smith")).await.unwrap();

        assert_eq!(
            f.service
                .search_clients(Some("C0001"), None)
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(matches!(
            f.service.search_clients(Some("ann"), Some("abc")).await,
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            f.service.search_clients(None, Some("5")).await,
            Err(AppError::InvalidArgument(_))
        ));
    }
}
