pub mod error;
pub mod target;
pub mod version;
