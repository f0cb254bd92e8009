//! The patcher: apply a patch to the live tree.
//!
//! This is the only engine component that mutates live nodes. It consumes
//! the patch exactly as the differ computed it - child patches are reused,
//! never re-derived at apply time - and routes every creation and attribute
//! assignment through the injected [`DialectPolicy`].
//!
//! The reserved `"key"` attribute is reconciliation metadata; it is filtered
//! here and never reaches the live attribute surface.

use tracing::trace;

use crate::host::{DialectPolicy, LiveNode};
use crate::node::{VNode, KEY_ATTR};
use crate::reconcile::patch::{AttrPatch, ChildPatches, KeyedEntry, Patch};

/// Apply `patch` to `current` under `parent`.
///
/// Returns the live node occupying the position afterwards: the current node
/// for in-place patches, a fresh node for creations and replacements, `None`
/// after a removal.
///
/// # Panics
///
/// Panics when `patch` requires a current live node and none is given, or
/// when a child patch refers to a live child that does not exist. Both are
/// collaborator bugs: the patch being applied was not computed against the
/// tree it is being applied to.
pub fn apply(
    parent: &LiveNode,
    current: Option<&LiveNode>,
    patch: &Patch,
    dialect: &dyn DialectPolicy,
) -> Option<LiveNode> {
    match patch {
        Patch::None => current.cloned(),
        Patch::Create(node) => {
            trace!("creating live subtree");
            let live = materialize(node, dialect);
            parent.append_child(live.clone());
            Some(live)
        }
        Patch::Remove => {
            let current = current.expect("remove patch requires a current live node");
            trace!("removing live subtree");
            parent.remove_child(current);
            None
        }
        Patch::Replace(node) => {
            let current = current.expect("replace patch requires a current live node");
            trace!("replacing live subtree");
            let live = materialize(node, dialect);
            parent.replace_child(current, live.clone());
            Some(live)
        }
        Patch::SetText(text) => {
            let current = current.expect("text patch requires a current live node");
            current.set_text(text);
            Some(current.clone())
        }
        Patch::Update { attrs, children } => {
            let current = current.expect("update patch requires a current live node");
            for attr in attrs {
                apply_attr(current, attr, dialect);
            }
            apply_children(current, children, dialect);
            Some(current.clone())
        }
    }
}

fn apply_attr(node: &LiveNode, patch: &AttrPatch, dialect: &dyn DialectPolicy) {
    match patch {
        AttrPatch::Set(name, value) => {
            if name != KEY_ATTR {
                dialect.assign_attribute(node, name, value);
            }
        }
        AttrPatch::Unset(name) => {
            if name != KEY_ATTR {
                dialect.remove_attribute(node, name);
            }
        }
    }
}

/// Materialize a description as a detached live subtree.
///
/// Creation is atomic: every declared child is created recursively before
/// the subtree is handed back.
fn materialize(node: &VNode, dialect: &dyn DialectPolicy) -> LiveNode {
    match node {
        VNode::Text(text) => dialect.create_text(text),
        VNode::Element(el) => {
            let live = dialect.create_element(&el.tag);
            for (name, value) in &el.attrs {
                if name != KEY_ATTR {
                    dialect.assign_attribute(&live, name, value);
                }
            }
            for child in &el.children {
                live.append_child(materialize(child, dialect));
            }
            live
        }
    }
}

fn apply_children(parent: &LiveNode, children: &ChildPatches, dialect: &dyn DialectPolicy) {
    match children {
        ChildPatches::None => {}
        ChildPatches::Positional(patches) => apply_positional(parent, patches, dialect),
        ChildPatches::Keyed(entries) => apply_keyed(parent, entries, dialect),
    }
}

/// Positional form: one patch per index of the longer child list.
///
/// Removals and creations only occur at the tail (positional diffing pairs
/// every shared index), so a single cursor over the live children suffices:
/// removals hold the cursor, everything else advances it.
fn apply_positional(parent: &LiveNode, patches: &[Patch], dialect: &dyn DialectPolicy) {
    let mut slot = 0;
    for patch in patches {
        match patch {
            Patch::Create(_) => {
                apply(parent, None, patch, dialect);
                slot += 1;
            }
            Patch::Remove => {
                let child = parent
                    .child(slot)
                    .expect("positional removal beyond live children");
                apply(parent, Some(&child), patch, dialect);
            }
            _ => {
                let child = parent
                    .child(slot)
                    .expect("positional patch beyond live children");
                apply(parent, Some(&child), patch, dialect);
                slot += 1;
            }
        }
    }
}

/// Keyed form: patch matched nodes in place, materialize creations, then
/// reorder with the move-before primitive and trim what is left over.
fn apply_keyed(parent: &LiveNode, entries: &[KeyedEntry], dialect: &dyn DialectPolicy) {
    let old_live = parent.children();
    let new_count = entries.iter().filter(|e| e.new_index.is_some()).count();
    let mut placed: Vec<Option<LiveNode>> = vec![None; new_count];

    for entry in entries {
        match (entry.old_index, entry.new_index) {
            (Some(old_index), Some(new_index)) => {
                let current = old_live
                    .get(old_index)
                    .expect("keyed entry refers to a missing live child");
                let live = apply(parent, Some(current), &entry.patch, dialect)
                    .expect("matched keyed entry must leave a live node");
                placed[new_index] = Some(live);
            }
            (None, Some(new_index)) => {
                // Materialized detached; the reorder pass inserts it.
                let Patch::Create(node) = &entry.patch else {
                    panic!("keyed creation entry must carry a create patch");
                };
                placed[new_index] = Some(materialize(node, dialect));
            }
            // Removals are swept out by the trailing truncate.
            (Some(_), None) => {}
            (None, None) => unreachable!("keyed entry with neither index"),
        }
    }

    // Reorder the live siblings to ascending new index. Earlier positions are
    // final once visited, so a node still attached elsewhere always sits at
    // or beyond the position it is moved to.
    for (index, live) in placed.iter().enumerate() {
        let live = live.as_ref().expect("every new index must be produced");
        let occupant = parent.child(index);
        if !occupant.is_some_and(|c| c.same(live)) {
            parent.insert_child_at(live.clone(), index);
        }
    }

    parent.truncate_children(new_count);
}
