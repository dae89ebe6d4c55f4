pub mod clients;
pub mod employees;
pub mod one_time_clients;
pub mod service_requests;
