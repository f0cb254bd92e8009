//! # rill
//!
//! A minimal reactive rendering engine: virtual tree descriptions, a
//! structural differ with keyed reconciliation, a patcher for live host
//! trees, and fine-grained reactivity wiring the two together.
//!
//! ## Architecture
//!
//! The whole engine is one synchronous loop:
//! ```text
//! store write → render effect re-runs → new VNode → diff vs previous → apply to live tree
//! ```
//!
//! Render functions build immutable [`VNode`] descriptions with the
//! [`h`]/[`text`] builders. [`diff`] compares two descriptions into a
//! [`Patch`], [`apply`] edits the live tree to match, and [`mount`] ties a
//! render function to a [`Store`]-backed [`Runtime`] so that every reactive
//! write flows through that loop before `set` returns.
//!
//! ## Modules
//!
//! - [`node`] - the virtual tree model ([`VNode`], [`AttrValue`])
//! - [`builder`] - ergonomic construction ([`h`], [`text`], [`keyed`])
//! - [`reconcile`] - diffing and patching ([`diff`], [`Patch`], [`apply`])
//! - [`host`] - the live tree and dialect policies ([`LiveNode`], [`DialectPolicy`])
//! - [`reactive`] - stores, effects, and the runtime ([`Store`], [`effect`])
//! - [`pipeline`] - the mount loop ([`mount`])

pub mod builder;
pub mod host;
pub mod node;
pub mod pipeline;
pub mod reactive;
pub mod reconcile;

// Re-export commonly used items
pub use builder::{h, keyed, text, Item};
pub use host::{DefaultDialect, DialectPolicy, LiveNode};
pub use node::{AttrValue, Handler, VElement, VNode, KEY_ATTR};
pub use pipeline::{mount, MountHandle};
pub use reactive::{effect, Effect, Runtime, Store};
pub use reconcile::{
    apply, diff, diff_attrs, diff_children, AttrPatch, ChildPatches, KeyedEntry, Patch,
};
