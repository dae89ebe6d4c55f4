pub mod client_profile_repository;

pub use client_profile_repository::ClientProfileRepository;
#[cfg(test)]
pub use client_profile_repository::MockClientProfileRepository;
