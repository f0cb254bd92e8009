//! Core tree-description types for rill.
//!
//! A [`VNode`] is an immutable description of one desired output node and its
//! subtree. Nodes are produced fresh on every render pass, compared by the
//! differ, and discarded once superseded - they are never mutated after
//! construction and never require external context to compare.
//!
//! Text nodes are their own variant, so a text node structurally cannot carry
//! attributes or children. Malformed descriptions are unrepresentable.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Reserved attribute name carrying a child's reconciliation key.
///
/// The key is metadata for the keyed reconciler only. The patcher filters it
/// out before anything reaches the live attribute surface.
pub const KEY_ATTR: &str = "key";

// =============================================================================
// Attribute values
// =============================================================================

/// Callback attribute value (event handler reference).
///
/// Handlers compare by identity: two handlers are equal only when they share
/// the same allocation. Cloning the handle preserves identity, so a handler
/// carried across render passes does not register as a changed attribute.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn()>);

impl Handler {
    /// Wrap a callback.
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self) {
        (self.0)()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0))
    }
}

/// An attribute value.
///
/// Equality is shallow: strings, booleans, and nested maps compare by value,
/// handlers by identity. No deep structural comparison happens anywhere in
/// the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Plain string value.
    Str(String),
    /// Boolean value (presence-style attributes).
    Bool(bool),
    /// Callback reference, compared by identity.
    Handler(Handler),
    /// Nested string-to-string map (style-like attributes).
    Map(BTreeMap<String, String>),
}

impl AttrValue {
    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<Handler> for AttrValue {
    fn from(h: Handler) -> Self {
        AttrValue::Handler(h)
    }
}

// =============================================================================
// Tree description
// =============================================================================

/// An element-like tree-description node.
#[derive(Debug, Clone, PartialEq)]
pub struct VElement {
    /// Tag naming the node's type within its markup dialect.
    pub tag: String,
    /// Attribute map; keys unique, iteration order deterministic.
    pub attrs: BTreeMap<String, AttrValue>,
    /// Ordered child descriptions.
    pub children: Vec<VNode>,
}

impl VElement {
    /// The reconciliation key, if this element carries one.
    ///
    /// Only string-valued `"key"` attributes count as keys.
    pub fn key(&self) -> Option<&str> {
        self.attrs.get(KEY_ATTR).and_then(AttrValue::as_str)
    }
}

/// Immutable description of one desired output node and its subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    /// An element with attributes and children.
    Element(VElement),
    /// A text node; the payload is the literal text.
    Text(String),
}

impl VNode {
    /// The element description, if this is an element node.
    pub fn as_element(&self) -> Option<&VElement> {
        match self {
            VNode::Element(el) => Some(el),
            VNode::Text(_) => None,
        }
    }

    /// The text payload, if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            VNode::Text(s) => Some(s),
            VNode::Element(_) => None,
        }
    }

    /// The reconciliation key, if this is a keyed element.
    pub fn key(&self) -> Option<&str> {
        self.as_element().and_then(VElement::key)
    }

    /// Whether two descriptions are of the same kind.
    ///
    /// Same kind means both are text, or both are elements with the same tag.
    /// Descriptions of different kinds are never reconciled in place; the
    /// differ replaces the whole subtree.
    pub fn same_kind(&self, other: &VNode) -> bool {
        match (self, other) {
            (VNode::Text(_), VNode::Text(_)) => true,
            (VNode::Element(a), VNode::Element(b)) => a.tag == b.tag,
            _ => false,
        }
    }
}
