pub mod one_time_client_repository_impl;

pub use one_time_client_repository_impl::OneTimeClientRepositoryImpl;
