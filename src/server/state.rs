use std::sync::Arc;

use crate::modules::clients::{ClientProfileRepository, ClientProfileService};
use crate::modules::employees::{EmployeeService, UserRepository};
use crate::modules::one_time_clients::{OneTimeClientRepository, OneTimeClientService};
use crate::modules::service_requests::{ServiceRequestRepository, ServiceRequestService};
use crate::shared::config::ClientIdSettings;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<ClientProfileService>,
    pub one_time_clients: Arc<OneTimeClientService>,
    pub service_requests: Arc<ServiceRequestService>,
    pub employees: Arc<EmployeeService>,
}

/// The four storage ports the services are wired from.
pub struct Repositories {
    pub clients: Arc<dyn ClientProfileRepository>,
    pub one_time_clients: Arc<dyn OneTimeClientRepository>,
    pub service_requests: Arc<dyn ServiceRequestRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(repositories: Repositories, settings: &ClientIdSettings) -> Self {
        let Repositories {
            clients,
            one_time_clients,
            service_requests,
            users,
        } = repositories;

        Self {
            clients: Arc::new(ClientProfileService::new(
                Arc::clone(&clients),
                Arc::clone(&service_requests),
                settings,
            )),
            one_time_clients: Arc::new(OneTimeClientService::new(
                Arc::clone(&one_time_clients),
                Arc::clone(&service_requests),
            )),
            service_requests: Arc::new(ServiceRequestService::new(
                service_requests,
                clients,
                one_time_clients,
            )),
            employees: Arc::new(EmployeeService::new(users)),
        }
    }
}
