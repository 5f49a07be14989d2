pub mod cache;
pub mod system;
