//! Child-list comparison: keyed reconciliation with positional fallback.
//!
//! When every new child carries a `"key"` attribute, old children are matched
//! by key instead of position, so reorders become moves rather than rewrites
//! and matched nodes keep their live identity. Anything less than fully keyed
//! falls back to positional comparison, where a shifted list degrades to a
//! rewrite of every shifted position - an accepted inefficiency, surfaced
//! once as a diagnostic, never an error.

use std::cell::Cell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::warn;

use crate::node::VNode;
use crate::reconcile::diff::diff;
use crate::reconcile::patch::{ChildPatches, KeyedEntry, Patch};

// One-shot diagnostic latches. Anomalies degrade rendering quality, not
// correctness, so each kind warns once per thread and stays quiet after.
const WARN_MIXED_KEYS: u8 = 1 << 0;
const WARN_KEYLESS_LIST: u8 = 1 << 1;
const WARN_DUPLICATE_KEYS: u8 = 1 << 2;

thread_local! {
    static WARNED: Cell<u8> = const { Cell::new(0) };
}

fn warn_once(flag: u8, message: &str) {
    WARNED.with(|warned| {
        if warned.get() & flag == 0 {
            warned.set(warned.get() | flag);
            warn!("{message}");
        }
    });
}

#[cfg(test)]
pub(crate) fn reset_warnings() {
    WARNED.with(|warned| warned.set(0));
}

/// Compare two child lists.
///
/// Keyed comparison applies when the new list is non-empty and every new
/// child is keyed; everything else is positional. An empty new list is
/// positional by decision, so removals stay index-aligned.
pub fn diff_children(old: &[VNode], new: &[VNode]) -> ChildPatches {
    if old.is_empty() && new.is_empty() {
        return ChildPatches::None;
    }

    let keyed_count = new.iter().filter(|child| child.key().is_some()).count();
    let all_keyed = !new.is_empty() && keyed_count == new.len();

    if !all_keyed {
        if keyed_count > 0 {
            warn_once(
                WARN_MIXED_KEYS,
                "mixed keyed and unkeyed siblings; falling back to positional reconciliation",
            );
        } else if new.len() > 1 {
            warn_once(
                WARN_KEYLESS_LIST,
                "keyless multi-child list; reorders will rewrite every shifted position",
            );
        }
        return diff_positional(old, new);
    }

    diff_keyed(old, new)
}

fn diff_positional(old: &[VNode], new: &[VNode]) -> ChildPatches {
    let len = old.len().max(new.len());
    let patches = (0..len).map(|i| diff(old.get(i), new.get(i))).collect();
    ChildPatches::Positional(patches)
}

fn diff_keyed(old: &[VNode], new: &[VNode]) -> ChildPatches {
    // Index the old children by key; first occurrence wins on duplicates.
    let mut by_key: HashMap<&str, (usize, &VNode)> = HashMap::with_capacity(old.len());
    for (index, child) in old.iter().enumerate() {
        match child.key() {
            Some(key) => match by_key.entry(key) {
                Entry::Occupied(_) => warn_once(
                    WARN_DUPLICATE_KEYS,
                    "duplicate reconciliation keys among siblings; later duplicates are recreated",
                ),
                Entry::Vacant(slot) => {
                    slot.insert((index, child));
                }
            },
            None => warn_once(
                WARN_MIXED_KEYS,
                "mixed keyed and unkeyed siblings; falling back to positional reconciliation",
            ),
        }
    }

    let mut consumed = vec![false; old.len()];
    let mut entries = Vec::with_capacity(new.len());
    let mut seen = HashMap::with_capacity(new.len());

    for (new_index, child) in new.iter().enumerate() {
        // diff_children only takes this path when every new child is keyed.
        let key = child.key().expect("all-keyed list contains unkeyed child");
        if seen.insert(key, new_index).is_some() {
            warn_once(
                WARN_DUPLICATE_KEYS,
                "duplicate reconciliation keys among siblings; later duplicates are recreated",
            );
        }

        match by_key.get(key) {
            Some(&(old_index, old_child)) if !consumed[old_index] => {
                consumed[old_index] = true;
                entries.push(KeyedEntry {
                    old_index: Some(old_index),
                    new_index: Some(new_index),
                    key: Some(key.to_string()),
                    patch: diff(Some(old_child), Some(child)),
                });
            }
            _ => entries.push(KeyedEntry {
                old_index: None,
                new_index: Some(new_index),
                key: Some(key.to_string()),
                patch: Patch::Create(child.clone()),
            }),
        }
    }

    for (old_index, child) in old.iter().enumerate() {
        if !consumed[old_index] {
            entries.push(KeyedEntry {
                old_index: Some(old_index),
                new_index: None,
                key: child.key().map(str::to_string),
                patch: Patch::Remove,
            });
        }
    }

    ChildPatches::Keyed(entries)
}
