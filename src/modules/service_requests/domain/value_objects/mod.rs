pub mod client_reference;
pub mod service_priority;
pub mod service_status;

pub use client_reference::ClientReference;
pub use service_priority::ServicePriority;
pub use service_status::ServiceStatus;
