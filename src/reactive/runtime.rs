//! The reactive runtime: dependency graph and the active-computation slot.
//!
//! One `Runtime` connects the stores and effects registered against it. It
//! owns three pieces of state:
//!
//! - the single *active* slot naming the computation currently running;
//! - the bidirectional dependency index, kept as two maps held consistent:
//!   `(store, key) → subscriber set` and `effect → dependency-key set`;
//! - the effect registry mapping ids to re-run closures.
//!
//! The runtime is an explicit context value, cheaply clonable and passed to
//! whoever needs it. It is `!Send` by construction (`Rc` inner), which makes
//! the single-threaded cooperative model a compile-time fact rather than a
//! convention.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

pub(crate) type StoreId = u64;
pub(crate) type EffectId = u64;

/// One tracked dependency: a property of a particular store.
pub(crate) type DepKey = (StoreId, String);

#[derive(Default)]
struct RuntimeInner {
    next_id: Cell<u64>,
    active: Cell<Option<EffectId>>,
    effects: RefCell<HashMap<EffectId, Rc<dyn Fn()>>>,
    subscribers: RefCell<HashMap<DepKey, HashSet<EffectId>>>,
    dependencies: RefCell<HashMap<EffectId, HashSet<DepKey>>>,
}

/// Shared handle to one reactive runtime.
#[derive(Clone, Default)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    /// Create a fresh runtime with no stores, effects, or subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc_id(&self) -> u64 {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        id
    }

    /// Attribute a read of `key` to the active computation, if any.
    ///
    /// Subscribing is idempotent within a run: both index sides are sets.
    pub(crate) fn track(&self, store: StoreId, key: &str) {
        let Some(effect) = self.inner.active.get() else {
            return;
        };
        let dep: DepKey = (store, key.to_string());
        self.inner
            .subscribers
            .borrow_mut()
            .entry(dep.clone())
            .or_default()
            .insert(effect);
        self.inner
            .dependencies
            .borrow_mut()
            .entry(effect)
            .or_default()
            .insert(dep);
    }

    /// Re-run every subscriber of `key`, except the active computation.
    ///
    /// The exception is the re-entrancy guard: a computation that writes a
    /// key it also reads must not recurse into itself. Subscribers run in
    /// registration order, synchronously, before this returns.
    pub(crate) fn notify(&self, store: StoreId, key: &str) {
        let targets: Vec<EffectId> = {
            let subscribers = self.inner.subscribers.borrow();
            let Some(set) = subscribers.get(&(store, key.to_string())) else {
                return;
            };
            let active = self.inner.active.get();
            let mut targets: Vec<EffectId> =
                set.iter().copied().filter(|id| Some(*id) != active).collect();
            targets.sort_unstable();
            targets
        };

        for id in targets {
            self.run_effect(id);
        }
    }

    pub(crate) fn register(&self, run: Rc<dyn Fn()>) -> EffectId {
        let id = self.alloc_id();
        self.inner.effects.borrow_mut().insert(id, run);
        id
    }

    /// One run of a computation: unsubscribe everywhere, mark active, invoke,
    /// restore the previously active computation.
    ///
    /// Clearing first is what makes dependency tracking dynamic - a key the
    /// run no longer reads is not resubscribed, so it stops triggering.
    pub(crate) fn run_effect(&self, id: EffectId) {
        // The effect may have been disposed by an earlier subscriber in the
        // same notification sweep.
        let Some(run) = self.inner.effects.borrow().get(&id).cloned() else {
            return;
        };

        self.clear_subscriptions(id);
        let previous = self.inner.active.replace(Some(id));
        run();
        self.inner.active.set(previous);
    }

    /// Remove `id` from every subscriber set it is in, keeping both sides of
    /// the index consistent.
    pub(crate) fn clear_subscriptions(&self, id: EffectId) {
        let deps = self.inner.dependencies.borrow_mut().remove(&id);
        let Some(deps) = deps else { return };
        let mut subscribers = self.inner.subscribers.borrow_mut();
        for dep in deps {
            if let Some(set) = subscribers.get_mut(&dep) {
                set.remove(&id);
                if set.is_empty() {
                    subscribers.remove(&dep);
                }
            }
        }
    }

    pub(crate) fn dispose_effect(&self, id: EffectId) {
        self.clear_subscriptions(id);
        self.inner.effects.borrow_mut().remove(&id);
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self, store: StoreId, key: &str) -> usize {
        self.inner
            .subscribers
            .borrow()
            .get(&(store, key.to_string()))
            .map_or(0, HashSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_outside_a_run_is_ignored() {
        let runtime = Runtime::new();
        runtime.track(0, "count");
        assert_eq!(runtime.subscriber_count(0, "count"), 0);
    }

    #[test]
    fn test_bidirectional_index_stays_consistent() {
        let runtime = Runtime::new();
        let id = runtime.register(Rc::new(|| {}));

        runtime.inner.active.set(Some(id));
        runtime.track(0, "a");
        runtime.track(0, "a");
        runtime.track(1, "b");
        runtime.inner.active.set(None);

        assert_eq!(runtime.subscriber_count(0, "a"), 1);
        assert_eq!(runtime.subscriber_count(1, "b"), 1);

        runtime.clear_subscriptions(id);
        assert_eq!(runtime.subscriber_count(0, "a"), 0);
        assert_eq!(runtime.subscriber_count(1, "b"), 0);
        assert!(runtime.inner.dependencies.borrow().is_empty());
        assert!(runtime.inner.subscribers.borrow().is_empty());
    }
}
