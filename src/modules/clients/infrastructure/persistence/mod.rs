pub mod client_profile_repository_impl;

pub use client_profile_repository_impl::ClientProfileRepositoryImpl;
