pub mod operation_tracker;

pub use operation_tracker::{OperationGuard, OperationTracker};
