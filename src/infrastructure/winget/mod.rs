pub mod command;
pub mod parser;
pub mod repository;

pub use command::{CommandError, WingetCommand};
pub use repository::WingetPackageRepository;
