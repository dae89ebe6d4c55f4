mod client_id_number;
mod client_search_query;

pub use client_id_number::{ClientIdFormat, ClientIdNumber};
pub use client_search_query::ClientSearchQuery;
