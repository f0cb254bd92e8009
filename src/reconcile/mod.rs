//! Reconciliation: diff tree descriptions, apply the result to the live tree.
//!
//! # Architecture
//!
//! ```text
//! (old VNode, new VNode) → diff → Patch → apply → mutated LiveNode tree
//! ```
//!
//! [`diff`] is pure: it compares two immutable descriptions and produces a
//! [`Patch`], a closed sum type describing the minimal transformation.
//! Child lists go through [`diff_children`], which matches by key when every
//! new child carries one and falls back to positional comparison otherwise.
//! [`apply`] is the only place the live tree is mutated; it consumes the
//! patch as computed - child patches are reused, never re-derived.

mod apply;
mod diff;
mod keyed;
mod patch;

pub use apply::apply;
pub use diff::{diff, diff_attrs};
pub use keyed::diff_children;
pub use patch::{AttrPatch, ChildPatches, KeyedEntry, Patch};
