pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{
    NewServiceRequest, ServiceRequest, ServiceRequestUpdate, StatusSummary, VehicleDetails,
};
pub use repositories::ServiceRequestRepository;
pub use value_objects::{ClientReference, ServicePriority, ServiceStatus};
