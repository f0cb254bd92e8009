//! The reactive store: observed reads, detected writes.
//!
//! A store wraps a plain string-keyed value map behind explicit `get`/`set`
//! accessors - the deliberate, visible contract replacing transparent
//! property interception. All state the render logic depends on must be
//! routed through these accessors for reactivity to see it.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::reactive::{Runtime, StoreId};

/// A reactive wrapper around a string-keyed value map.
///
/// Values need `Clone` (reads hand out copies; the map stays owned) and
/// `PartialEq` (writes of an unchanged value are no-ops). Equality is
/// shallow - whatever `PartialEq` says for `V`.
pub struct Store<V> {
    runtime: Runtime,
    id: StoreId,
    values: RefCell<HashMap<String, V>>,
}

impl<V: Clone + PartialEq> Store<V> {
    /// Wrap `target` in a reactive store registered with `runtime`.
    pub fn wrap(runtime: &Runtime, target: HashMap<String, V>) -> Self {
        Self {
            runtime: runtime.clone(),
            id: runtime.alloc_id(),
            values: RefCell::new(target),
        }
    }

    /// Read a property.
    ///
    /// When a computation is running, it is subscribed to this key - reads
    /// of keys that are currently absent subscribe too, so a later insert
    /// triggers the computation.
    pub fn get(&self, key: &str) -> Option<V> {
        self.runtime.track(self.id, key);
        self.values.borrow().get(key).cloned()
    }

    /// Write a property.
    ///
    /// A write of an equal value stores nothing and notifies nobody.
    /// Otherwise every subscribed computation re-runs synchronously before
    /// this returns, except the computation performing the write (re-entrant
    /// self-triggering is suppressed). There is no batching: two changed
    /// writes in a row mean two notification cascades.
    ///
    /// Mutual write cycles between *different* keys (A's subscriber writes B,
    /// B's subscriber writes A) are not detected and will recurse without
    /// bound. Known limitation.
    pub fn set(&self, key: &str, value: V) {
        {
            let mut values = self.values.borrow_mut();
            if values.get(key) == Some(&value) {
                return;
            }
            values.insert(key.to_string(), value);
            // Borrow released before notification: subscribers read back.
        }
        self.runtime.notify(self.id, key);
    }

    /// Number of stored properties.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether the store holds no properties.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(pairs: &[(&str, i64)]) -> (Runtime, Store<i64>) {
        let runtime = Runtime::new();
        let target = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<HashMap<_, _>>();
        let store = Store::wrap(&runtime, target);
        (runtime, store)
    }

    #[test]
    fn test_plain_read_write() {
        let (_runtime, store) = store_of(&[("count", 0)]);
        assert_eq!(store.get("count"), Some(0));
        assert_eq!(store.get("missing"), None);

        store.set("count", 5);
        assert_eq!(store.get("count"), Some(5));

        store.set("fresh", 1);
        assert_eq!(store.get("fresh"), Some(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unchanged_write_stores_nothing_new() {
        let (_runtime, store) = store_of(&[("count", 3)]);
        store.set("count", 3);
        assert_eq!(store.get("count"), Some(3));
    }
}
