//! The live output tree.
//!
//! A [`LiveNode`] is a cheap handle (reference-counted) to one mutable node.
//! Handle identity is node identity: [`LiveNode::same`] tells whether two
//! handles point at the same live node, which is how tests (and embedders)
//! verify that reconciliation moved a node instead of recreating it.
//!
//! The mutation surface is exactly what the patcher needs: attribute
//! assignment, in-place text updates, and ordered child manipulation
//! including [`LiveNode::insert_child_at`], the move-before primitive that
//! relocates an existing child without recreating it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::node::AttrValue;

enum LiveData {
    Element {
        tag: String,
        namespace: Option<String>,
        attrs: BTreeMap<String, AttrValue>,
        children: Vec<LiveNode>,
    },
    Text(String),
}

/// Handle to one mutable live output node.
#[derive(Clone)]
pub struct LiveNode {
    inner: Rc<RefCell<LiveData>>,
}

impl LiveNode {
    /// Create a detached live element.
    pub fn element(tag: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LiveData::Element {
                tag: tag.into(),
                namespace,
                attrs: BTreeMap::new(),
                children: Vec::new(),
            })),
        }
    }

    /// Create a detached live text node.
    pub fn text(payload: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LiveData::Text(payload.into()))),
        }
    }

    /// Whether two handles refer to the same live node.
    pub fn same(&self, other: &LiveNode) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(*self.inner.borrow(), LiveData::Text(_))
    }

    /// The element tag, if this is an element.
    pub fn tag(&self) -> Option<String> {
        match &*self.inner.borrow() {
            LiveData::Element { tag, .. } => Some(tag.clone()),
            LiveData::Text(_) => None,
        }
    }

    /// The namespace assigned at creation, if any.
    pub fn namespace(&self) -> Option<String> {
        match &*self.inner.borrow() {
            LiveData::Element { namespace, .. } => namespace.clone(),
            LiveData::Text(_) => None,
        }
    }

    // =========================================================================
    // Text surface
    // =========================================================================

    /// The text payload of a text node.
    pub fn text_content(&self) -> Option<String> {
        match &*self.inner.borrow() {
            LiveData::Text(s) => Some(s.clone()),
            LiveData::Element { .. } => None,
        }
    }

    /// Mutate the text payload in place. Identity is preserved.
    ///
    /// # Panics
    ///
    /// Panics on an element node; only the patcher calls this, and only for
    /// text patches.
    pub fn set_text(&self, payload: &str) {
        match &mut *self.inner.borrow_mut() {
            LiveData::Text(s) => {
                s.clear();
                s.push_str(payload);
            }
            LiveData::Element { .. } => panic!("set_text on a live element node"),
        }
    }

    // =========================================================================
    // Attribute surface
    // =========================================================================

    /// Read one attribute.
    pub fn attr(&self, name: &str) -> Option<AttrValue> {
        match &*self.inner.borrow() {
            LiveData::Element { attrs, .. } => attrs.get(name).cloned(),
            LiveData::Text(_) => None,
        }
    }

    /// The currently set attribute names, in deterministic order.
    pub fn attr_names(&self) -> Vec<String> {
        match &*self.inner.borrow() {
            LiveData::Element { attrs, .. } => attrs.keys().cloned().collect(),
            LiveData::Text(_) => Vec::new(),
        }
    }

    /// Assign one attribute. A write of an equal value is a no-op.
    ///
    /// # Panics
    ///
    /// Panics on a text node.
    pub fn set_attr(&self, name: &str, value: AttrValue) {
        match &mut *self.inner.borrow_mut() {
            LiveData::Element { attrs, .. } => {
                if attrs.get(name) != Some(&value) {
                    attrs.insert(name.to_string(), value);
                }
            }
            LiveData::Text(_) => panic!("set_attr on a live text node"),
        }
    }

    /// Remove one attribute, if set.
    pub fn remove_attr(&self, name: &str) {
        if let LiveData::Element { attrs, .. } = &mut *self.inner.borrow_mut() {
            attrs.remove(name);
        }
    }

    // =========================================================================
    // Child surface
    // =========================================================================

    /// Number of children. Zero for text nodes.
    pub fn child_count(&self) -> usize {
        match &*self.inner.borrow() {
            LiveData::Element { children, .. } => children.len(),
            LiveData::Text(_) => 0,
        }
    }

    /// The child at `index`, if present.
    pub fn child(&self, index: usize) -> Option<LiveNode> {
        match &*self.inner.borrow() {
            LiveData::Element { children, .. } => children.get(index).cloned(),
            LiveData::Text(_) => None,
        }
    }

    /// Snapshot of the current child handles.
    pub fn children(&self) -> Vec<LiveNode> {
        match &*self.inner.borrow() {
            LiveData::Element { children, .. } => children.clone(),
            LiveData::Text(_) => Vec::new(),
        }
    }

    /// Position of `child` among this node's children.
    pub fn position_of(&self, child: &LiveNode) -> Option<usize> {
        match &*self.inner.borrow() {
            LiveData::Element { children, .. } => children.iter().position(|c| c.same(child)),
            LiveData::Text(_) => None,
        }
    }

    /// Append a child at the end.
    ///
    /// # Panics
    ///
    /// Panics on a text node.
    pub fn append_child(&self, child: LiveNode) {
        match &mut *self.inner.borrow_mut() {
            LiveData::Element { children, .. } => children.push(child),
            LiveData::Text(_) => panic!("append_child on a live text node"),
        }
    }

    /// Move-before primitive: place `child` at `index`.
    ///
    /// If `child` is already among this node's children it is detached from
    /// its current position first - relocated, not recreated. `index` is
    /// clamped to the child count.
    pub fn insert_child_at(&self, child: LiveNode, index: usize) {
        match &mut *self.inner.borrow_mut() {
            LiveData::Element { children, .. } => {
                if let Some(current) = children.iter().position(|c| c.same(&child)) {
                    children.remove(current);
                }
                let index = index.min(children.len());
                children.insert(index, child);
            }
            LiveData::Text(_) => panic!("insert_child_at on a live text node"),
        }
    }

    /// Detach `child`. Returns whether it was present.
    pub fn remove_child(&self, child: &LiveNode) -> bool {
        match &mut *self.inner.borrow_mut() {
            LiveData::Element { children, .. } => {
                match children.iter().position(|c| c.same(child)) {
                    Some(index) => {
                        children.remove(index);
                        true
                    }
                    None => false,
                }
            }
            LiveData::Text(_) => false,
        }
    }

    /// Substitute `new` at `old`'s position.
    ///
    /// # Panics
    ///
    /// Panics when `old` is not a child of this node; the patcher only
    /// replaces nodes it previously created here.
    pub fn replace_child(&self, old: &LiveNode, new: LiveNode) {
        match &mut *self.inner.borrow_mut() {
            LiveData::Element { children, .. } => {
                let index = children
                    .iter()
                    .position(|c| c.same(old))
                    .expect("replace_child: node to replace is not a child");
                children[index] = new;
            }
            LiveData::Text(_) => panic!("replace_child on a live text node"),
        }
    }

    /// Drop all children beyond `len`.
    pub fn truncate_children(&self, len: usize) {
        if let LiveData::Element { children, .. } = &mut *self.inner.borrow_mut() {
            children.truncate(len);
        }
    }
}

impl fmt::Debug for LiveNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner.borrow() {
            LiveData::Text(s) => write!(f, "LiveText({s:?})"),
            LiveData::Element {
                tag,
                namespace,
                attrs,
                children,
            } => {
                let mut dbg = f.debug_struct("LiveElement");
                dbg.field("tag", tag);
                if let Some(ns) = namespace {
                    dbg.field("namespace", ns);
                }
                dbg.field("attrs", attrs).field("children", children).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let a = LiveNode::element("div", None);
        let b = LiveNode::element("div", None);
        let a2 = a.clone();

        assert!(a.same(&a2));
        assert!(!a.same(&b));
    }

    #[test]
    fn test_set_text_preserves_identity() {
        let t = LiveNode::text("before");
        let handle = t.clone();
        t.set_text("after");

        assert!(t.same(&handle));
        assert_eq!(handle.text_content(), Some("after".to_string()));
    }

    #[test]
    fn test_child_manipulation() {
        let parent = LiveNode::element("ul", None);
        let a = LiveNode::element("li", None);
        let b = LiveNode::element("li", None);
        let c = LiveNode::element("li", None);
        parent.append_child(a.clone());
        parent.append_child(b.clone());
        parent.append_child(c.clone());

        assert_eq!(parent.child_count(), 3);
        assert_eq!(parent.position_of(&b), Some(1));

        assert!(parent.remove_child(&b));
        assert!(!parent.remove_child(&b));
        assert_eq!(parent.child_count(), 2);
        assert!(parent.child(1).unwrap().same(&c));
    }

    #[test]
    fn test_insert_child_at_moves_existing() {
        let parent = LiveNode::element("ul", None);
        let a = LiveNode::element("li", None);
        let b = LiveNode::element("li", None);
        let c = LiveNode::element("li", None);
        parent.append_child(a.clone());
        parent.append_child(b.clone());
        parent.append_child(c.clone());

        // Move c to the front; nothing is recreated.
        parent.insert_child_at(c.clone(), 0);
        assert_eq!(parent.child_count(), 3);
        assert!(parent.child(0).unwrap().same(&c));
        assert!(parent.child(1).unwrap().same(&a));
        assert!(parent.child(2).unwrap().same(&b));

        // A detached node is simply inserted.
        let d = LiveNode::element("li", None);
        parent.insert_child_at(d.clone(), 2);
        assert!(parent.child(2).unwrap().same(&d));
        assert_eq!(parent.child_count(), 4);
    }

    #[test]
    fn test_truncate_children() {
        let parent = LiveNode::element("ul", None);
        for _ in 0..4 {
            parent.append_child(LiveNode::element("li", None));
        }
        parent.truncate_children(2);
        assert_eq!(parent.child_count(), 2);
    }

    #[test]
    fn test_attr_equal_write_is_noop() {
        let el = LiveNode::element("div", None);
        el.set_attr("class", "box".into());
        el.set_attr("class", "box".into());
        assert_eq!(el.attr("class"), Some(AttrValue::from("box")));
        assert_eq!(el.attr_names(), vec!["class".to_string()]);
    }

    #[test]
    #[should_panic(expected = "set_text on a live element node")]
    fn test_set_text_on_element_fails_fast() {
        LiveNode::element("div", None).set_text("nope");
    }
}
