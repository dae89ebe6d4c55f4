mod attribution;

pub use attribution::Attribution;
