pub mod backend;
pub mod detection;
pub mod monitor;
pub mod shared;
