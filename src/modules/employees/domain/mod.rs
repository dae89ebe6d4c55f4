pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{EmployeeUpdate, NewUser, User};
pub use repositories::UserRepository;
pub use value_objects::{PasswordHash, Role};
