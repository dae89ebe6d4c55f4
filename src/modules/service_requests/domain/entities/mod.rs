pub mod service_request;

pub use service_request::{
    NewServiceRequest, ServiceRequest, ServiceRequestUpdate, StatusSummary, VehicleDetails,
};
