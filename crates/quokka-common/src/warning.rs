//! Deduplicated engine warnings.
//!
//! Layout never aborts on odd input; it falls back to some geometry and
//! reports what happened. The same anomaly tends to repeat for every box of a
//! document, so each distinct message is emitted only once through
//! [`log::warn!`] with the component name as the log target.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an anomaly (emitted once per unique component/message pair).
///
/// # Example
/// ```
/// quokka_common::warning::warn_once("layout", "zero intrinsic width for <img>, using 1px");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        log::warn!(target: "quokka", "[{component}] {message}");
    }
}

/// Returns true if this exact warning has already been emitted.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call before laying out a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        warn_once("test", "recorded once");
        assert!(was_warned("test", "recorded once"));
        assert!(!was_warned("test", "never emitted"));
    }
}
