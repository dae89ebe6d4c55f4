pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{ClientProfile, ClientProfileDraft, ClientProfileUpdate, NewClientProfile};
pub use repositories::ClientProfileRepository;
pub use services::{ClientIdAllocator, ClientSearchResolver};
pub use value_objects::{ClientIdFormat, ClientIdNumber, ClientSearchQuery};
