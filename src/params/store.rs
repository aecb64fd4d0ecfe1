//! Parameter storage with generational handles

use super::ParamValue;

/// Non-owning handle to a parameter in a [`ParamStore`].
///
/// Carries the slot's generation at hand-out time. If the parameter is
/// removed, the slot's generation advances and the handle dangles: lookups
/// return `None` instead of reaching a reused slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamHandle {
    index: usize,
    generation: u32,
}

struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

struct Entry {
    name: String,
    value: ParamValue,
}

/// Arena of named parameters.
///
/// The single mutable resource of the mapping session: the binding table is
/// read-only after construction, and all dispatch happens through handles
/// into this store.
#[derive(Default)]
pub struct ParamStore {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl ParamStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter and return its handle
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) -> ParamHandle {
        let entry = Entry { name: name.into(), value };

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.entry = Some(entry);
            ParamHandle { index, generation: slot.generation }
        } else {
            self.slots.push(Slot { generation: 0, entry: Some(entry) });
            ParamHandle { index: self.slots.len() - 1, generation: 0 }
        }
    }

    /// Remove a parameter, invalidating all handles to it
    pub fn remove(&mut self, handle: ParamHandle) -> Option<ParamValue> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(entry.value)
    }

    /// Get a parameter's current state; `None` if the handle dangles
    pub fn get(&self, handle: ParamHandle) -> Option<&ParamValue> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref().map(|e| &e.value)
    }

    /// Mutable access for dispatch; `None` if the handle dangles
    pub fn get_mut(&mut self, handle: ParamHandle) -> Option<&mut ParamValue> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_mut().map(|e| &mut e.value)
    }

    /// Get a parameter's name; `None` if the handle dangles
    pub fn name(&self, handle: ParamHandle) -> Option<&str> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref().map(|e| e.name.as_str())
    }

    /// Look up a parameter by name
    pub fn find(&self, name: &str) -> Option<ParamHandle> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            let entry = slot.entry.as_ref()?;
            (entry.name == name).then_some(ParamHandle { index, generation: slot.generation })
        })
    }

    /// Number of live parameters
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    /// Check whether the store holds no parameters
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut store = ParamStore::new();
        let handle = store.insert("cutoff", ParamValue::Float { value: 0.5, min: 0.0, max: 1.0 });

        assert_eq!(store.get(handle), Some(&ParamValue::Float { value: 0.5, min: 0.0, max: 1.0 }));
        assert_eq!(store.name(handle), Some("cutoff"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_find_by_name() {
        let mut store = ParamStore::new();
        let a = store.insert("a", ParamValue::Bool { value: false });
        let b = store.insert("b", ParamValue::Bool { value: true });

        assert_eq!(store.find("a"), Some(a));
        assert_eq!(store.find("b"), Some(b));
        assert_eq!(store.find("c"), None);
    }

    #[test]
    fn test_remove_invalidates_handle() {
        let mut store = ParamStore::new();
        let handle = store.insert("gone", ParamValue::Int { value: 1, min: 0, max: 10 });

        assert_eq!(store.remove(handle), Some(ParamValue::Int { value: 1, min: 0, max: 10 }));
        assert_eq!(store.get(handle), None);
        assert_eq!(store.name(handle), None);
        assert!(store.is_empty());

        // Removing twice is a no-op
        assert_eq!(store.remove(handle), None);
    }

    #[test]
    fn test_stale_handle_does_not_see_reused_slot() {
        let mut store = ParamStore::new();
        let old = store.insert("old", ParamValue::Bool { value: true });
        store.remove(old);

        // The freed slot gets reused with a new generation
        let new = store.insert("new", ParamValue::Bool { value: false });
        assert_ne!(old, new);
        assert_eq!(store.get(old), None);
        assert_eq!(store.get(new), Some(&ParamValue::Bool { value: false }));
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut store = ParamStore::new();
        let handle = store.insert("x", ParamValue::Float { value: 0.0, min: 0.0, max: 1.0 });

        if let Some(ParamValue::Float { value, .. }) = store.get_mut(handle) {
            *value = 0.75;
        }

        assert_eq!(store.get(handle), Some(&ParamValue::Float { value: 0.75, min: 0.0, max: 1.0 }));
    }
}
