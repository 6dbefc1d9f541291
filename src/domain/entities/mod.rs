pub mod config;
pub mod package;

pub use config::AppConfig;
pub use package::{LocalPackage, OperationKind, OperationRequest, SearchPackage};
