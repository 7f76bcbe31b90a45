extern crate fixie;
extern crate rand;

use fixie::utils::Registry;

#[test]
fn allocation_yields_distinct_nonzero_handles() {
    let mut registry = Registry::new();

    let mut seen = Vec::new();
    for _ in 0..64 {
        let handle = registry.allocate((), false);
        assert!(handle != 0);
        assert!(!seen.contains(&handle));
        seen.push(handle);
    }
    assert_eq!(registry.len(), 64);
}

#[test]
fn erase_of_missing_or_protected_is_noop() {
    let mut registry = Registry::new();
    registry.insert(0, "default", true);
    let shielded = registry.allocate("shielded", true);
    let plain = registry.allocate("plain", false);

    assert_eq!(registry.erase(0), None);
    assert_eq!(registry.erase(shielded), None);
    assert_eq!(registry.erase(9999), None);
    assert_eq!(registry.erase(plain), Some("plain"));

    assert!(registry.contains(0));
    assert!(registry.contains(shielded));
    assert!(!registry.contains(plain));
}

#[test]
fn freed_handles_reused_only_after_erase() {
    let mut registry = Registry::new();
    let handles: Vec<u32> = (0..8).map(|v| registry.allocate(v, false)).collect();

    // While registered, fresh allocations never collide.
    for _ in 0..8 {
        let fresh = registry.allocate(100, false);
        assert!(!handles.contains(&fresh));
        registry.erase(fresh);
    }

    registry.erase(handles[3]);
    assert_eq!(registry.allocate(101, false), handles[3]);
}

#[test]
fn reuse_stress() {
    let mut registry = Registry::new();
    let mut live = Vec::new();

    for _ in 0..5 {
        for _ in 0..50 {
            live.push(registry.allocate(0u32, false));
        }

        for _ in 0..25 {
            let index = rand::random::<usize>() % live.len();
            let handle = live.swap_remove(index);
            assert!(registry.erase(handle).is_some());
            assert!(!registry.contains(handle));
        }
    }

    assert_eq!(registry.len(), live.len());
    for handle in live {
        assert!(registry.contains(handle));
    }
}
