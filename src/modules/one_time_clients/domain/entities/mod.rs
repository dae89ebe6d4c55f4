pub mod one_time_client;

pub use one_time_client::{NewOneTimeClient, OneTimeClient, OneTimeClientUpdate};
