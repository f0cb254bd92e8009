//! Live output tree and the dialect seam.
//!
//! The live tree is the mutable, materialized counterpart of the immutable
//! tree descriptions. The patcher is the only engine component that mutates
//! it; how elements are created and how attributes land on them is decided by
//! an injected [`DialectPolicy`], never hard-coded.

mod dialect;
mod tree;

pub use dialect::{DefaultDialect, DialectPolicy};
pub use tree::LiveNode;
