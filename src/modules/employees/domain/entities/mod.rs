pub mod user;

pub use user::{EmployeeUpdate, NewUser, User};
