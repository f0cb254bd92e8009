//! The render pipeline: one effect from state to live tree.
//!
//! ```text
//! store write → render effect re-runs → new VNode → diff vs previous → apply
//! ```
//!
//! [`mount`] registers the ONE render effect and owns the previous
//! description and previous live node across passes. It is the only caller
//! of the differ/patcher pair outside tests.

pub mod mount;

pub use mount::{mount, MountHandle};
