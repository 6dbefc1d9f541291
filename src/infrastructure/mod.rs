pub mod config_repository;
pub mod winget;

pub use config_repository::ConfigRepository;
