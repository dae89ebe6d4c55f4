pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod routes;

pub use application::OneTimeClientService;
pub use domain::{OneTimeClient, OneTimeClientRepository};
pub use infrastructure::OneTimeClientRepositoryImpl;
