pub mod service_request_repository_impl;

pub use service_request_repository_impl::ServiceRequestRepositoryImpl;
