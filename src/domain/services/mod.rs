pub mod merge;

pub use merge::PackageMerger;
