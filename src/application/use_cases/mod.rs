pub mod package_operations;
pub mod query_packages;

pub use package_operations::*;
pub use query_packages::QueryPackages;
