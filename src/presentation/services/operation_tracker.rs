use crate::domain::entities::OperationKind;
use std::sync::{Arc, Mutex};

struct ActiveOperation {
    kind: OperationKind,
    package_name: String,
}

/// Shared record of the one package operation allowed to run at a time.
/// The operation path writes it, the query path only reads it to decide
/// whether to short-circuit.
pub struct OperationTracker {
    active: Mutex<Option<ActiveOperation>>,
}

impl OperationTracker {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
        }
    }

    /// Claim the operation slot. Returns `None` when an operation is
    /// already running; the returned guard releases the slot on drop, so
    /// the lock clears on success, failure and panic alike.
    pub fn try_begin(
        self: &Arc<Self>,
        kind: OperationKind,
        package_name: &str,
    ) -> Option<OperationGuard> {
        let mut active = self.active.lock().unwrap();
        if active.is_some() {
            return None;
        }
        *active = Some(ActiveOperation {
            kind,
            package_name: package_name.to_string(),
        });
        Some(OperationGuard {
            tracker: Arc::clone(self),
        })
    }

    /// Human-readable progress line for the running operation, if any,
    /// e.g. "Installing 7-Zip...".
    pub fn status_line(&self) -> Option<String> {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .map(|active| format!("{} {}...", active.kind.progressive(), active.package_name))
    }
}

impl Default for OperationTracker {
    fn default() -> Self {
        Self::new()
    }
}

pub struct OperationGuard {
    tracker: Arc<OperationTracker>,
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        self.tracker.active.lock().unwrap().take();
    }
}
