pub mod one_time_client_repository;

pub use one_time_client_repository::OneTimeClientRepository;

#[cfg(test)]
pub use one_time_client_repository::MockOneTimeClientRepository;
