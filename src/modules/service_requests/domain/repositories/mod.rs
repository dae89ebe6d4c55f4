pub mod service_request_repository;

pub use service_request_repository::ServiceRequestRepository;

#[cfg(test)]
pub use service_request_repository::MockServiceRequestRepository;
