pub mod calculator;
pub mod log;
pub mod models;
pub mod platforms;
pub mod shifts;

use crate::store::DocumentStore;
use crate::ui::messages::warning;

/// Audit trail is best effort: a failed log write never fails the operation.
pub(crate) fn audit(store: &dyn DocumentStore, operation: &str, target: &str, message: &str) {
    if let Err(e) = store.log(operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}
