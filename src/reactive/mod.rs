//! Fine-grained reactivity: stores, effects, and the runtime between them.
//!
//! # Architecture
//!
//! ```text
//! store.set(key, v) → notify subscribers → effect re-runs → store.get(key) re-tracks
//! ```
//!
//! A [`Store`] exposes explicit `get`/`set` accessors over a string-keyed
//! value map. Reads performed while an effect is running subscribe that
//! effect to the key; writes of a changed value synchronously re-run every
//! subscriber. The dependency graph lives in the [`Runtime`], an explicit
//! context handle shared by the stores and effects it connects - there is no
//! process-wide global.
//!
//! Everything is single-threaded and synchronous: a write cascades through
//! every dependent re-run before `set` returns. Dependencies are dynamic -
//! each run resubscribes from scratch, so a read that stops happening stops
//! triggering.

mod effect;
mod runtime;
mod store;

pub use effect::{effect, Effect};
pub use runtime::Runtime;
pub use store::Store;

pub(crate) use runtime::{EffectId, StoreId};
