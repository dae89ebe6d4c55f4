pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod routes;

pub use application::EmployeeService;
pub use domain::{Role, User, UserRepository};
pub use infrastructure::UserRepositoryImpl;
