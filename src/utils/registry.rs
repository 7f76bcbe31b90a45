//! Generic integer-handle registry with the legacy API's ownership quirks.
//!
//! Every resource kind (buffers, textures, renderbuffers, framebuffers,
//! vertex-array sets, fences) owns an independent `Registry` and therefore
//! an independent handle namespace. Handle 0 always denotes "no object /
//! the default object": it is never handed out by [`Registry::allocate`]
//! and can never be erased. Default objects are installed at handle 0 with
//! the `protected` flag, which additionally shields them from `erase`.

use std::collections::BTreeSet;

use crate::utils::hash::FastHashMap;

struct Entry<T> {
    object: T,
    protected: bool,
}

pub struct Registry<T> {
    entries: FastHashMap<u32, Entry<T>>,
    // Erased handles, recycled smallest-first before the counter grows.
    frees: BTreeSet<u32>,
    next: u32,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry::new()
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Registry {
            entries: FastHashMap::default(),
            frees: BTreeSet::new(),
            next: 1,
        }
    }

    /// Stores `object` under a fresh handle and returns it. Handles count
    /// up from 1; erased handles are reused (smallest first) before the
    /// counter grows further.
    pub fn allocate(&mut self, object: T, protected: bool) -> u32 {
        let handle = match self.frees.iter().next().cloned() {
            Some(v) => {
                self.frees.remove(&v);
                v
            }
            None => {
                let v = self.next;
                self.next += 1;
                v
            }
        };

        self.entries.insert(handle, Entry { object, protected });
        handle
    }

    /// Stores `object` under a caller-chosen handle, replacing any previous
    /// entry. The legacy API lets callers conjure names out of thin air
    /// (binding an ungenerated name creates the object), so the counter and
    /// free list are kept consistent with whatever arrives here.
    pub fn insert(&mut self, handle: u32, object: T, protected: bool) {
        if handle >= self.next {
            for skipped in self.next..handle {
                self.frees.insert(skipped);
            }
            self.next = handle + 1;
        } else {
            self.frees.remove(&handle);
        }

        self.entries.insert(handle, Entry { object, protected });
    }

    /// Removes and returns the object stored under `handle`. Erasing handle
    /// 0, a protected entry, or a handle that was never registered is a
    /// no-op; validation beyond that happens one layer up.
    pub fn erase(&mut self, handle: u32) -> Option<T> {
        if handle == 0 {
            return None;
        }

        match self.entries.get(&handle) {
            Some(entry) if entry.protected => return None,
            None => return None,
            _ => {}
        }

        self.frees.insert(handle);
        self.entries.remove(&handle).map(|entry| entry.object)
    }

    #[inline]
    pub fn contains(&self, handle: u32) -> bool {
        self.entries.contains_key(&handle)
    }

    #[inline]
    pub fn get(&self, handle: u32) -> Option<&T> {
        self.entries.get(&handle).map(|entry| &entry.object)
    }

    #[inline]
    pub fn get_mut(&mut self, handle: u32) -> Option<&mut T> {
        self.entries.get_mut(&handle).map(|entry| &mut entry.object)
    }

    /// Returns the number of live entries, protected defaults included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.entries.iter().map(|(handle, entry)| (*handle, &entry.object))
    }

    pub fn handles(&self) -> Vec<u32> {
        self.entries.keys().cloned().collect()
    }
}

impl<T: PartialEq> Registry<T> {
    pub fn handle_of(&self, object: &T) -> Option<u32> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.object == *object)
            .map(|(handle, _)| *handle)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn allocate_counts_up_from_one() {
        let mut registry = Registry::new();
        for expected in 1..=16u32 {
            assert_eq!(registry.allocate(expected, false), expected);
        }
        assert!(!registry.contains(0));
    }

    #[test]
    fn erase_recycles_smallest_first() {
        let mut registry = Registry::new();
        let handles: Vec<u32> = (0..4).map(|v| registry.allocate(v, false)).collect();

        assert_eq!(registry.erase(handles[2]), Some(2));
        assert_eq!(registry.erase(handles[0]), Some(0));

        assert_eq!(registry.allocate(10, false), handles[0]);
        assert_eq!(registry.allocate(11, false), handles[2]);
        assert_eq!(registry.allocate(12, false), 5);
    }

    #[test]
    fn zero_and_protected_are_immortal() {
        let mut registry = Registry::new();
        registry.insert(0, -1, true);
        let user = registry.allocate(7, false);
        let shielded = registry.allocate(8, true);

        assert_eq!(registry.erase(0), None);
        assert_eq!(registry.erase(shielded), None);
        assert_eq!(registry.erase(user), Some(7));
        assert!(registry.contains(0));
        assert!(registry.contains(shielded));
    }

    #[test]
    fn insert_of_ungenerated_name() {
        let mut registry = Registry::new();
        registry.insert(5, 50, false);
        assert!(registry.contains(5));

        // The skipped range is handed out before the counter grows past it.
        assert_eq!(registry.allocate(10, false), 1);
        assert_eq!(registry.allocate(11, false), 2);

        registry.insert(3, 30, false);
        assert_eq!(registry.allocate(12, false), 4);
        assert_eq!(registry.allocate(13, false), 6);
    }

    #[test]
    fn handle_of_finds_object() {
        let mut registry = Registry::new();
        let a = registry.allocate("a", false);
        let b = registry.allocate("b", false);
        assert_eq!(registry.handle_of(&"a"), Some(a));
        assert_eq!(registry.handle_of(&"b"), Some(b));
        assert_eq!(registry.handle_of(&"c"), None);
    }
}
