pub mod entities;
pub mod repositories;

pub use entities::{NewOneTimeClient, OneTimeClient, OneTimeClientUpdate};
pub use repositories::OneTimeClientRepository;
