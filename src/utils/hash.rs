use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasherDefault, Hash, Hasher};

/// Hash map backed by a fast, non-cryptographic hasher. Keys are small
/// (integer handles, structural fingerprints), so DoS resistance is not a
/// concern here.
pub type FastHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Hash set counterpart of [`FastHashMap`].
pub type FastHashSet<V> = HashSet<V, BuildHasherDefault<FxHasher>>;

pub fn hash64<T: Hash + ?Sized>(v: &T) -> u64 {
    let mut state = FxHasher::default();
    v.hash(&mut state);
    state.finish()
}

const SEED: u64 = 0x51_7c_c1_b7_27_22_0a_95;

/// The hash algorithm used by rustc, word-at-a-time multiply-rotate.
#[derive(Default)]
pub struct FxHasher {
    hash: u64,
}

impl FxHasher {
    #[inline]
    fn add_to_hash(&mut self, i: u64) {
        self.hash = (self.hash.rotate_left(5) ^ i).wrapping_mul(SEED);
    }
}

impl Hasher for FxHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.add_to_hash(u64::from(*byte));
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.add_to_hash(u64::from(i));
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.add_to_hash(u64::from(i));
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.add_to_hash(u64::from(i));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.add_to_hash(i);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.add_to_hash(i as u64);
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(hash64(&42u32), hash64(&42u32));
        assert!(hash64(&42u32) != hash64(&43u32));
    }

    #[test]
    fn collections() {
        let mut set = FastHashSet::default();
        assert!(set.insert(1u32));
        assert!(!set.insert(1u32));
        assert!(set.insert(2u32));
        assert_eq!(set.len(), 2);
    }
}
