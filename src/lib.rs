pub mod ci;
pub mod config;
pub mod logging;
pub mod repo;
pub mod version;
