//! Dialect policy: how live nodes come into being.
//!
//! Different markup dialects differ in how elements are created (namespaced
//! creation primitives) and how attributes land on them (property quirks).
//! The patcher takes this policy as a capability parameter, so embedders can
//! swap it without touching reconciliation. Selection heuristics (which tag
//! belongs to which dialect) are the embedder's business, not the engine's.

use crate::host::LiveNode;
use crate::node::AttrValue;

/// Injected element-creation and attribute-assignment policy.
///
/// Every method has a reasonable default; a policy only overrides what its
/// dialect actually does differently.
pub trait DialectPolicy {
    /// Namespace for elements of this tag, if the dialect has one.
    fn namespace_for(&self, tag: &str) -> Option<String> {
        let _ = tag;
        None
    }

    /// Create a live element for `tag`.
    fn create_element(&self, tag: &str) -> LiveNode {
        LiveNode::element(tag, self.namespace_for(tag))
    }

    /// Create a live text node.
    fn create_text(&self, payload: &str) -> LiveNode {
        LiveNode::text(payload)
    }

    /// Assign one attribute to a live element.
    fn assign_attribute(&self, node: &LiveNode, name: &str, value: &AttrValue) {
        node.set_attr(name, value.clone());
    }

    /// Remove one attribute from a live element.
    fn remove_attribute(&self, node: &LiveNode, name: &str) {
        node.remove_attr(name);
    }
}

/// The trivial policy: namespace-less elements, verbatim attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDialect;

impl DialectPolicy for DefaultDialect {}

#[cfg(test)]
mod tests {
    use super::*;

    struct SvgishDialect;

    impl DialectPolicy for SvgishDialect {
        fn namespace_for(&self, tag: &str) -> Option<String> {
            match tag {
                "svg" | "path" | "circle" => Some("svg".to_string()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_default_dialect() {
        let dialect = DefaultDialect;
        let el = dialect.create_element("div");
        assert_eq!(el.tag(), Some("div".to_string()));
        assert_eq!(el.namespace(), None);

        dialect.assign_attribute(&el, "id", &"root".into());
        assert_eq!(el.attr("id"), Some(AttrValue::from("root")));
        dialect.remove_attribute(&el, "id");
        assert_eq!(el.attr("id"), None);
    }

    #[test]
    fn test_namespace_is_policy_driven() {
        let dialect = SvgishDialect;
        assert_eq!(
            dialect.create_element("circle").namespace(),
            Some("svg".to_string())
        );
        assert_eq!(dialect.create_element("div").namespace(), None);
    }
}
