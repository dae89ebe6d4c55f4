pub mod service;

pub use service::ClientProfileService;
