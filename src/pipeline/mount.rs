//! Mount API - attach a render function to a live root.
//!
//! Mounting registers the render effect: every run invokes the render
//! function (tracking its reactive reads), diffs the produced description
//! against the previous one, and applies the patch to the live tree. The
//! handle owns the previous `(VNode, LiveNode)` pair between passes.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::rc::Rc;
//! use rill::{h, mount, DefaultDialect, LiveNode, Runtime, Store};
//!
//! let runtime = Runtime::new();
//! let store = Rc::new(Store::wrap(
//!     &runtime,
//!     HashMap::from([("label".to_string(), "hello".to_string())]),
//! ));
//! let root = LiveNode::element("app", None);
//!
//! let reader = store.clone();
//! let handle = mount(&runtime, &root, Rc::new(DefaultDialect), move || {
//!     h("p", vec![], vec![reader.get("label").unwrap_or_default().into()])
//! });
//!
//! store.set("label", "world".to_string());
//! let p = handle.live_node().unwrap();
//! assert_eq!(p.child(0).unwrap().text_content(), Some("world".to_string()));
//! handle.unmount();
//! assert_eq!(root.child_count(), 0);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::host::{DialectPolicy, LiveNode};
use crate::node::VNode;
use crate::reactive::{effect, Effect, Runtime};
use crate::reconcile::{apply, diff, Patch};

/// Handle returned by [`mount`] that allows unmounting.
///
/// Holds the render effect and the previous-pass state. Dropping the handle
/// disposes the effect (best effort) but leaves the rendered subtree in
/// place; [`MountHandle::unmount`] removes that too.
pub struct MountHandle {
    render_effect: Option<Effect>,
    root: LiveNode,
    previous: Rc<RefCell<Option<(VNode, LiveNode)>>>,
}

impl MountHandle {
    /// Stop the render effect and detach the rendered subtree.
    pub fn unmount(mut self) {
        if let Some(render_effect) = self.render_effect.take() {
            render_effect.dispose();
        }
        if let Some((_, live)) = self.previous.borrow_mut().take() {
            self.root.remove_child(&live);
        }
    }

    /// The live node produced by the most recent render pass.
    pub fn live_node(&self) -> Option<LiveNode> {
        self.previous.borrow().as_ref().map(|(_, live)| live.clone())
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if let Some(render_effect) = self.render_effect.take() {
            render_effect.dispose();
        }
    }
}

/// Mount `render` under `root`.
///
/// Runs one render pass immediately (materializing the initial subtree) and
/// re-runs whenever a reactive property read during the last pass changes.
/// Each pass diffs against the previous description and applies the minimal
/// patch; unchanged live nodes keep their identity across passes.
pub fn mount(
    runtime: &Runtime,
    root: &LiveNode,
    dialect: Rc<dyn DialectPolicy>,
    render: impl Fn() -> VNode + 'static,
) -> MountHandle {
    let previous: Rc<RefCell<Option<(VNode, LiveNode)>>> = Rc::new(RefCell::new(None));

    let pass_state = previous.clone();
    let pass_root = root.clone();
    let render_effect = effect(runtime, move || {
        let next = render();
        let last = pass_state.borrow_mut().take();

        let live = match last {
            None => {
                trace!("initial render pass");
                apply(&pass_root, None, &Patch::Create(next.clone()), dialect.as_ref())
            }
            Some((previous_node, previous_live)) => {
                let patch = diff(Some(&previous_node), Some(&next));
                trace!(noop = patch.is_noop(), "render pass");
                apply(&pass_root, Some(&previous_live), &patch, dialect.as_ref())
            }
        };

        // diff of two present descriptions never yields a removal.
        let live = live.expect("render pass must leave a live node");
        *pass_state.borrow_mut() = Some((next, live));
    });

    MountHandle {
        render_effect: Some(render_effect),
        root: root.clone(),
        previous,
    }
}
