pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod routes;

pub use application::{ServiceRequestDetails, ServiceRequestService};
pub use domain::{ServiceRequest, ServiceRequestRepository};
pub use infrastructure::ServiceRequestRepositoryImpl;
