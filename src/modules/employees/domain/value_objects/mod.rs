pub mod password_hash;
pub mod role;

pub use password_hash::PasswordHash;
pub use role::Role;
