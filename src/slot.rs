use std::sync::Mutex;

/// Holds at most one pending value. A second `put` before a `take`
/// overwrites the first.
#[derive(Debug)]
pub struct InteractiveSlot<T> {
    value: Mutex<Option<T>>,
}

impl<T> Default for InteractiveSlot<T> {
    fn default() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }
}

impl<T> InteractiveSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, returning whatever it displaced.
    pub fn put(&self, value: T) -> Option<T> {
        self.value.lock().ok().and_then(|mut v| v.replace(value))
    }

    /// Returns the pending value and leaves the slot empty.
    pub fn take(&self) -> Option<T> {
        self.value.lock().ok().and_then(|mut v| v.take())
    }

    pub fn clear(&self) {
        self.take();
    }

    pub fn is_empty(&self) -> bool {
        self.value.lock().map(|v| v.is_none()).unwrap_or(true)
    }
}
