pub mod service;

pub use service::{ServiceRequestDetails, ServiceRequestService};
