//! # Concurrency Tests using Loom
//!
//! This module uses loom to model the keyed insert `ResultsStore` performs
//! from every worker. The store itself is built on `std::sync`, which loom
//! cannot instrument, so the model reproduces its `Arc<Mutex<BTreeMap>>`
//! shape with loom's primitives: distinct keys are never lost, and racing
//! writers of the same key leave exactly one entry.

#[cfg(test)]
mod tests {
    use loom::sync::{Arc, Mutex};
    use loom::thread;
    use std::collections::BTreeMap;

    type Store = Arc<Mutex<BTreeMap<String, u32>>>;

    fn insert(store: &Store, key: &str, value: u32) {
        store.lock().unwrap().insert(key.to_string(), value);
    }

    #[test]
    fn test_distinct_keys_are_all_recorded() {
        loom::model(|| {
            let store: Store = Arc::new(Mutex::new(BTreeMap::new()));

            let handles: Vec<_> = ["frontend_critical_unit", "backend_critical_unit"]
                .into_iter()
                .enumerate()
                .map(|(i, key)| {
                    let store = store.clone();
                    thread::spawn(move || insert(&store, key, i as u32))
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(store.lock().unwrap().len(), 2);
        });
    }

    #[test]
    fn test_same_key_keeps_one_of_the_writes() {
        loom::model(|| {
            let store: Store = Arc::new(Mutex::new(BTreeMap::new()));

            let handles: Vec<_> = (0..2)
                .map(|i| {
                    let store = store.clone();
                    thread::spawn(move || insert(&store, "frontend_critical_e2e", i))
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            let map = store.lock().unwrap();
            assert_eq!(map.len(), 1);
            assert!(matches!(map.get("frontend_critical_e2e"), Some(0 | 1)));
        });
    }
}
