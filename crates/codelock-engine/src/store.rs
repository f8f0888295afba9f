//! Fixed-capacity access-code storage.

use codelock_protocol::{SlotIndex, MAX_CODE_LENGTH, SLOT_COUNT};

/// An owned access-code string bounded to [`MAX_CODE_LENGTH`] bytes.
///
/// Assignment truncates silently at the capacity, backing off to a
/// character boundary when the cut would split a multi-byte character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessCode {
    value: String,
}

impl AccessCode {
    /// Replace the stored value, truncating to [`MAX_CODE_LENGTH`] bytes.
    pub fn assign_truncated(&mut self, value: &str) {
        self.value.clear();
        if value.len() <= MAX_CODE_LENGTH {
            self.value.push_str(value);
        } else {
            let mut end = MAX_CODE_LENGTH;
            while !value.is_char_boundary(end) {
                end -= 1;
            }
            self.value.push_str(&value[..end]);
        }
    }

    /// The stored value.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether no value (or an empty value) is stored.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// The device's three access-code slots.
///
/// All slots start empty. An empty stored value is indistinguishable from a
/// never-set slot: [`CodeStore::get`] reports neither. There is no delete
/// operation; slots are only ever overwritten.
#[derive(Debug, Default)]
pub struct CodeStore {
    slots: [AccessCode; SLOT_COUNT],
}

impl CodeStore {
    /// Create a store with all slots empty.
    pub fn new() -> Self {
        CodeStore::default()
    }

    /// Look up the code in `slot`, or `None` when the slot holds nothing.
    pub fn get(&self, slot: SlotIndex) -> Option<&str> {
        let code = &self.slots[slot.as_usize()];
        if code.is_empty() {
            None
        } else {
            Some(code.as_str())
        }
    }

    /// Store `value` into `slot`, truncating to [`MAX_CODE_LENGTH`] bytes.
    ///
    /// Never fails: the index is validated by construction and oversized
    /// values are cut down silently.
    pub fn set(&mut self, slot: SlotIndex, value: &str) {
        self.slots[slot.as_usize()].assign_truncated(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(n: u8) -> SlotIndex {
        SlotIndex::new(n).unwrap()
    }

    #[test]
    fn test_all_slots_start_empty() {
        let store = CodeStore::new();
        for n in 0..SLOT_COUNT as u8 {
            assert_eq!(store.get(slot(n)), None);
        }
    }

    #[test]
    fn test_set_then_get() {
        let mut store = CodeStore::new();
        store.set(slot(1), "hello");
        assert_eq!(store.get(slot(1)), Some("hello"));
        assert_eq!(store.get(slot(0)), None);
    }

    #[test]
    fn test_overwrite() {
        let mut store = CodeStore::new();
        store.set(slot(0), "first");
        store.set(slot(0), "second");
        assert_eq!(store.get(slot(0)), Some("second"));
    }

    #[test]
    fn test_truncates_to_capacity() {
        let mut store = CodeStore::new();
        let long = "x".repeat(MAX_CODE_LENGTH + 1);
        store.set(slot(2), &long);
        assert_eq!(store.get(slot(2)), Some(&long[..MAX_CODE_LENGTH]));
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        let mut store = CodeStore::new();
        // 99 ASCII bytes followed by a two-byte character straddling the
        // 100-byte capacity: the cut backs off to 99 bytes.
        let value = format!("{}é!", "x".repeat(MAX_CODE_LENGTH - 1));
        store.set(slot(0), &value);
        assert_eq!(store.get(slot(0)), Some(&value[..MAX_CODE_LENGTH - 1]));
    }

    #[test]
    fn test_empty_value_reads_as_unset() {
        let mut store = CodeStore::new();
        store.set(slot(1), "secret");
        store.set(slot(1), "");
        assert_eq!(store.get(slot(1)), None);
    }
}
