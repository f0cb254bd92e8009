//! Convenience constructors for tree descriptions.
//!
//! The reconciliation core assumes well-formed [`VNode`] values: flat child
//! sequences, text content already wrapped in text nodes. This module is the
//! collaborator that produces them:
//!
//! - [`h`] - build an element from a tag, attribute pairs, and children
//! - [`text`] - build a text node
//! - [`keyed`] - attach a reconciliation key to an element
//!
//! Children are given as [`Item`]s, so callers can mix nodes, plain strings
//! (coerced to text nodes), nested lists (flattened), and holes:
//!
//! ```
//! use rill::{h, Item};
//!
//! let todos = vec!["Learn Rust", "Ship it"];
//! let list = h(
//!     "ul",
//!     vec![("class", "todos".into())],
//!     vec![
//!         Item::from("static heading"),
//!         todos.iter().map(|t| Item::from(h("li", vec![], vec![(*t).into()]))).collect(),
//!     ],
//! );
//! assert_eq!(list.as_element().unwrap().children.len(), 3);
//! ```

use std::collections::BTreeMap;

use crate::node::{AttrValue, VElement, VNode, KEY_ATTR};

// =============================================================================
// Child items
// =============================================================================

/// One child position in a builder call.
///
/// Flattening and coercion happen here, at construction time; the core never
/// sees anything but plain [`VNode`] sequences.
#[derive(Debug, Clone)]
pub enum Item {
    /// A ready-made node.
    Node(VNode),
    /// A nested list, flattened in order.
    List(Vec<Item>),
    /// A hole; skipped entirely.
    Empty,
}

impl From<VNode> for Item {
    fn from(node: VNode) -> Self {
        Item::Node(node)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Node(VNode::Text(s.to_string()))
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::Node(VNode::Text(s))
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::List(items)
    }
}

impl<T: Into<Item>> From<Option<T>> for Item {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Item::Empty,
        }
    }
}

impl FromIterator<Item> for Item {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Item::List(iter.into_iter().collect())
    }
}

fn flatten_into(item: Item, out: &mut Vec<VNode>) {
    match item {
        Item::Node(node) => out.push(node),
        Item::List(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        Item::Empty => {}
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Build an element description.
///
/// Later duplicates in `attrs` win, matching last-assignment semantics.
pub fn h(
    tag: impl Into<String>,
    attrs: Vec<(&str, AttrValue)>,
    children: Vec<Item>,
) -> VNode {
    let mut attr_map = BTreeMap::new();
    for (name, value) in attrs {
        attr_map.insert(name.to_string(), value);
    }

    let mut flat = Vec::new();
    for child in children {
        flatten_into(child, &mut flat);
    }

    VNode::Element(VElement {
        tag: tag.into(),
        attrs: attr_map,
        children: flat,
    })
}

/// Build a text node.
pub fn text(s: impl Into<String>) -> VNode {
    VNode::Text(s.into())
}

/// Attach a reconciliation key to an element description.
///
/// # Panics
///
/// Panics when given a text node: text nodes cannot carry keys, and asking
/// for one is a bug in the calling component.
pub fn keyed(key: impl Into<String>, node: VNode) -> VNode {
    match node {
        VNode::Element(mut el) => {
            el.attrs.insert(KEY_ATTR.to_string(), AttrValue::Str(key.into()));
            VNode::Element(el)
        }
        VNode::Text(_) => panic!("keyed() requires an element node; text nodes cannot carry keys"),
    }
}
