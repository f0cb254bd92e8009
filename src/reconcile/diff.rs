//! The differ: compare two tree descriptions, produce a patch.
//!
//! Pure data transformation - nothing here touches the live tree. Kinds that
//! do not match are never reconciled in place; the whole subtree is replaced.
//! Attribute comparison is shallow (see [`crate::node::AttrValue`]).

use std::collections::BTreeMap;

use tracing::trace;

use crate::node::{AttrValue, VNode};
use crate::reconcile::keyed::diff_children;
use crate::reconcile::patch::{AttrPatch, Patch};

/// Compare an old and a new description.
///
/// Absence on one side yields creation or removal; both absent is a no-op.
pub fn diff(old: Option<&VNode>, new: Option<&VNode>) -> Patch {
    match (old, new) {
        (None, None) => Patch::None,
        (None, Some(new)) => Patch::Create(new.clone()),
        (Some(_), None) => Patch::Remove,
        (Some(old), Some(new)) => diff_nodes(old, new),
    }
}

fn diff_nodes(old: &VNode, new: &VNode) -> Patch {
    if !old.same_kind(new) {
        trace!("kind mismatch, replacing subtree");
        return Patch::Replace(new.clone());
    }

    match (old, new) {
        (VNode::Text(old_text), VNode::Text(new_text)) => {
            if old_text == new_text {
                Patch::None
            } else {
                Patch::SetText(new_text.clone())
            }
        }
        (VNode::Element(old_el), VNode::Element(new_el)) => {
            let attrs = diff_attrs(&old_el.attrs, &new_el.attrs);
            let children = diff_children(&old_el.children, &new_el.children);
            if attrs.is_empty() && children.is_noop() {
                Patch::None
            } else {
                Patch::Update { attrs, children }
            }
        }
        // same_kind returned true, so the kinds agree.
        _ => unreachable!("same_kind nodes must both be text or both be elements"),
    }
}

/// Compare two attribute maps.
///
/// Emits `Set` for every key that is new or whose value changed (shallow
/// equality, handlers by identity), then `Unset` for every key that
/// disappeared.
pub fn diff_attrs(
    old: &BTreeMap<String, AttrValue>,
    new: &BTreeMap<String, AttrValue>,
) -> Vec<AttrPatch> {
    let mut patches = Vec::new();
    for (name, value) in new {
        if old.get(name) != Some(value) {
            patches.push(AttrPatch::Set(name.clone(), value.clone()));
        }
    }
    for name in old.keys() {
        if !new.contains_key(name) {
            patches.push(AttrPatch::Unset(name.clone()));
        }
    }
    patches
}
