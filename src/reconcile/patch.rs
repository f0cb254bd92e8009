//! Patch representation.
//!
//! A [`Patch`] describes the minimal transformation from one tree-description
//! state to another, as a closed sum type: one variant per patch kind, with
//! exhaustive matching in the patcher. Child patches come in two forms -
//! positional (index-aligned) and keyed (matched by identity) - and which
//! form applies is a property of the comparison, not of the node.

use crate::node::{AttrValue, VNode};

/// Transformation of a single node (and, through child patches, its subtree).
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Nothing changed.
    None,
    /// Materialize this description as a new live subtree.
    Create(VNode),
    /// Detach the current live node.
    Remove,
    /// Substitute a freshly materialized subtree for the current live node.
    Replace(VNode),
    /// Overwrite the text payload in place; identity preserved.
    SetText(String),
    /// Same-kind update: attribute changes plus child transformations.
    Update {
        attrs: Vec<AttrPatch>,
        children: ChildPatches,
    },
}

impl Patch {
    /// Whether this patch changes nothing.
    pub fn is_noop(&self) -> bool {
        matches!(self, Patch::None)
    }
}

/// One attribute change.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrPatch {
    /// Set `name` to `value` (added or changed).
    Set(String, AttrValue),
    /// Remove `name`.
    Unset(String),
}

/// Child-list transformation, in one of the two comparison forms.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildPatches {
    /// No child comparison took place (both lists empty).
    None,
    /// Index-aligned patches, one per position of the longer list.
    Positional(Vec<Patch>),
    /// Key-matched entries: matches (possibly moves), creations, removals.
    Keyed(Vec<KeyedEntry>),
}

impl ChildPatches {
    /// Whether applying these patches would change nothing.
    ///
    /// A positional list of no-ops is a no-op. A keyed list is a no-op only
    /// when every entry is an identity match: same index on both sides and a
    /// no-op patch - any move, creation, or removal disqualifies it.
    pub fn is_noop(&self) -> bool {
        match self {
            ChildPatches::None => true,
            ChildPatches::Positional(patches) => patches.iter().all(Patch::is_noop),
            ChildPatches::Keyed(entries) => entries.iter().all(|entry| {
                entry.patch.is_noop()
                    && entry.old_index.is_some()
                    && entry.old_index == entry.new_index
            }),
        }
    }
}

/// One entry of a keyed child-list comparison.
///
/// `new_index` absent means removal, `old_index` absent means creation, both
/// present means a match that may have moved. `key` is `None` only for an
/// unkeyed old child swept out while reconciling an all-keyed new list.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedEntry {
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
    pub key: Option<String>,
    pub patch: Patch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_noop() {
        assert!(ChildPatches::None.is_noop());
        assert!(ChildPatches::Positional(vec![Patch::None, Patch::None]).is_noop());
        assert!(!ChildPatches::Positional(vec![Patch::None, Patch::Remove]).is_noop());
    }

    #[test]
    fn test_keyed_noop_requires_identity_matches() {
        let identity = KeyedEntry {
            old_index: Some(0),
            new_index: Some(0),
            key: Some("a".to_string()),
            patch: Patch::None,
        };
        assert!(ChildPatches::Keyed(vec![identity.clone()]).is_noop());

        let moved = KeyedEntry {
            new_index: Some(1),
            ..identity.clone()
        };
        assert!(!ChildPatches::Keyed(vec![moved]).is_noop());

        let removed = KeyedEntry {
            new_index: None,
            patch: Patch::Remove,
            ..identity
        };
        assert!(!ChildPatches::Keyed(vec![removed]).is_noop());
    }
}
