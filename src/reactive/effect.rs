//! Effects: re-runnable computations with tracked dependencies.
//!
//! Registering an effect runs it once immediately; every reactive read
//! during that run subscribes the effect. Each subsequent run starts from a
//! clean slate - subscriptions are cleared and rebuilt - so the dependency
//! set can shrink or shift between runs.

use std::rc::Rc;

use crate::reactive::{EffectId, Runtime};

/// Handle to a registered effect.
///
/// The effect stays registered until [`Effect::dispose`] is called; dropping
/// the handle alone does not stop it. Disposal is the only teardown.
pub struct Effect {
    runtime: Runtime,
    id: EffectId,
}

impl Effect {
    /// Unregister the effect and drop all of its subscriptions.
    pub fn dispose(self) {
        self.runtime.dispose_effect(self.id);
    }
}

/// Register `f` as an effect on `runtime` and run it once.
///
/// While `f` runs it is the active computation: store reads subscribe it,
/// and a write it performs to one of its own dependencies does not re-enter
/// it. Only one computation is active at a time; when a write inside one
/// effect triggers another, the inner run completes before the outer one
/// resumes, and the outer effect's remaining reads still attribute to it.
pub fn effect(runtime: &Runtime, f: impl Fn() + 'static) -> Effect {
    let id = runtime.register(Rc::new(f));
    runtime.run_effect(id);
    Effect {
        runtime: runtime.clone(),
        id,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::reactive::Store;

    fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let c = Rc::new(Cell::new(0));
        (c.clone(), c)
    }

    #[test]
    fn test_effect_runs_immediately() {
        let runtime = Runtime::new();
        let (runs, probe) = counter();

        let _effect = effect(&runtime, move || {
            runs.set(runs.get() + 1);
        });
        assert_eq!(probe.get(), 1);
    }

    #[test]
    fn test_changed_write_reruns_exactly_once() {
        let runtime = Runtime::new();
        let store = Rc::new(Store::wrap(
            &runtime,
            HashMap::from([("count".to_string(), 0)]),
        ));
        let (runs, probe) = counter();

        let reader = store.clone();
        let _effect = effect(&runtime, move || {
            runs.set(runs.get() + 1);
            let _ = reader.get("count");
        });
        assert_eq!(probe.get(), 1);

        store.set("count", 1);
        assert_eq!(probe.get(), 2);

        // Same value again: no notification.
        store.set("count", 1);
        assert_eq!(probe.get(), 2);
    }

    #[test]
    fn test_untracked_key_does_not_rerun() {
        let runtime = Runtime::new();
        let store = Rc::new(Store::wrap(
            &runtime,
            HashMap::from([("read".to_string(), 0), ("ignored".to_string(), 0)]),
        ));
        let (runs, probe) = counter();

        let reader = store.clone();
        let _effect = effect(&runtime, move || {
            runs.set(runs.get() + 1);
            let _ = reader.get("read");
        });

        store.set("ignored", 7);
        assert_eq!(probe.get(), 1);
    }

    #[test]
    fn test_dynamic_dependency_shrink() {
        let runtime = Runtime::new();
        let store = Rc::new(Store::wrap(
            &runtime,
            HashMap::from([("flag".to_string(), 1), ("x".to_string(), 0)]),
        ));
        let (runs, probe) = counter();

        let reader = store.clone();
        let _effect = effect(&runtime, move || {
            runs.set(runs.get() + 1);
            if reader.get("flag") == Some(1) {
                let _ = reader.get("x");
            }
        });
        assert_eq!(probe.get(), 1);

        // While flag is set, x-writes re-run the effect.
        store.set("x", 1);
        assert_eq!(probe.get(), 2);

        // Clearing the flag re-runs once; the rebuilt subscriptions no
        // longer include x.
        store.set("flag", 0);
        assert_eq!(probe.get(), 3);

        store.set("x", 2);
        store.set("x", 3);
        assert_eq!(probe.get(), 3);
    }

    #[test]
    fn test_self_write_does_not_recurse() {
        let runtime = Runtime::new();
        let store = Rc::new(Store::wrap(
            &runtime,
            HashMap::from([("count".to_string(), 0)]),
        ));
        let (runs, probe) = counter();

        let inner = store.clone();
        let _effect = effect(&runtime, move || {
            runs.set(runs.get() + 1);
            if let Some(count) = inner.get("count") {
                // Writes a key this effect depends on; self-trigger is
                // suppressed, so this terminates.
                inner.set("count", count + 1);
            }
        });
        assert_eq!(probe.get(), 1);
        assert_eq!(store.get("count"), Some(1));

        // An outside write triggers one re-run, which increments once more.
        store.set("count", 10);
        assert_eq!(probe.get(), 2);
        assert_eq!(store.get("count"), Some(11));
    }

    #[test]
    fn test_two_effects_both_notified_in_registration_order() {
        let runtime = Runtime::new();
        let store = Rc::new(Store::wrap(
            &runtime,
            HashMap::from([("count".to_string(), 0)]),
        ));
        let order = Rc::new(RefCellVec::default());

        let (reader, log) = (store.clone(), order.clone());
        let _first = effect(&runtime, move || {
            let _ = reader.get("count");
            log.push("first");
        });
        let (reader, log) = (store.clone(), order.clone());
        let _second = effect(&runtime, move || {
            let _ = reader.get("count");
            log.push("second");
        });

        order.clear();
        store.set("count", 1);
        assert_eq!(order.snapshot(), vec!["first", "second"]);
    }

    #[test]
    fn test_dispose_stops_reruns() {
        let runtime = Runtime::new();
        let store = Rc::new(Store::wrap(
            &runtime,
            HashMap::from([("count".to_string(), 0)]),
        ));
        let (runs, probe) = counter();

        let reader = store.clone();
        let handle = effect(&runtime, move || {
            runs.set(runs.get() + 1);
            let _ = reader.get("count");
        });

        handle.dispose();
        store.set("count", 1);
        assert_eq!(probe.get(), 1);
    }

    #[test]
    fn test_write_in_one_effect_triggers_another_synchronously() {
        let runtime = Runtime::new();
        let store = Rc::new(Store::wrap(
            &runtime,
            HashMap::from([("source".to_string(), 0), ("derived".to_string(), 0)]),
        ));

        // Downstream effect mirrors `derived`.
        let (runs, probe) = counter();
        let reader = store.clone();
        let _downstream = effect(&runtime, move || {
            runs.set(runs.get() + 1);
            let _ = reader.get("derived");
        });

        // Upstream effect writes `derived` from `source`.
        let pipe = store.clone();
        let _upstream = effect(&runtime, move || {
            if let Some(v) = pipe.get("source") {
                pipe.set("derived", v * 2);
            }
        });

        assert_eq!(probe.get(), 1); // registration write was a no-op (0 == 0)

        store.set("source", 4);
        assert_eq!(store.get("derived"), Some(8));
        assert_eq!(probe.get(), 2); // cascaded before set("source") returned
    }

    /// Tiny push-only log for asserting run order.
    #[derive(Default)]
    struct RefCellVec(std::cell::RefCell<Vec<&'static str>>);

    impl RefCellVec {
        fn push(&self, s: &'static str) {
            self.0.borrow_mut().push(s);
        }
        fn clear(&self) {
            self.0.borrow_mut().clear();
        }
        fn snapshot(&self) -> Vec<&'static str> {
            self.0.borrow().clone()
        }
    }
}
