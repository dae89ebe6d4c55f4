pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod routes;

// Re-exports for easy external access
pub use application::ClientProfileService;
pub use domain::{ClientProfile, ClientProfileRepository};
pub use infrastructure::ClientProfileRepositoryImpl;
