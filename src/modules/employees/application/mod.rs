pub mod service;

pub use service::{EmployeeService, RegisterEmployee, DEMO_PASSWORD};
