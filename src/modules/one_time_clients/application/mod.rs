pub mod service;

pub use service::OneTimeClientService;
