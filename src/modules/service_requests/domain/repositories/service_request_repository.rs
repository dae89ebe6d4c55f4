use crate::modules::service_requests::domain::entities::{
    NewServiceRequest, ServiceRequest, StatusSummary,
};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRequestRepository: Send + Sync {
    async fn insert(&self, request: NewServiceRequest) -> AppResult<ServiceRequest>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceRequest>>;

    async fn get_all(&self) -> AppResult<Vec<ServiceRequest>>;

    /// Tickets referencing the client profile `client_id`
    async fn find_by_client(&self, client_id: i32) -> AppResult<Vec<ServiceRequest>>;

    async fn count_for_client(&self, client_id: i32) -> AppResult<i64>;

    async fn count_for_one_time_client(&self, one_time_client_id: i32) -> AppResult<i64>;

    async fn update(&self, request: &ServiceRequest) -> AppResult<ServiceRequest>;

    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn status_summary(&self) -> AppResult<StatusSummary>;
}
