//! Taffy Bridge - Measure sticky views in a Taffy layout tree.
//!
//! `TaffyMeasurer` answers measurement requests against a shared
//! `TaffyTree`. Requests are queued and answered on `flush()`, which is how a
//! host layout system behaves: the answer arrives after the current event,
//! once layout has run.
//!
//! Only nodes explicitly mounted with [`TaffyMeasurer::mount`] resolve. Taffy
//! itself cannot tell a removed node from a live one without panicking, so
//! the measurer keeps its own record.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use taffy::{NodeId, TaffyTree};

use crate::error::MeasureError;
use crate::types::LayoutRect;

use super::measure::{LayoutMeasurer, MeasureCallback};

/// Shared Taffy tree. The measurer only reads computed layouts.
pub type SharedTree = Rc<RefCell<TaffyTree<()>>>;

struct PendingMeasure {
    view: NodeId,
    container: NodeId,
    done: MeasureCallback,
}

/// Queued, callback-based measurer over a Taffy tree.
///
/// Cloning yields another handle to the same tree, mount set and queue.
#[derive(Clone)]
pub struct TaffyMeasurer {
    tree: SharedTree,
    mounted: Rc<RefCell<HashSet<NodeId>>>,
    pending: Rc<RefCell<VecDeque<PendingMeasure>>>,
}

impl TaffyMeasurer {
    pub fn new(tree: SharedTree) -> Self {
        Self {
            tree,
            mounted: Rc::new(RefCell::new(HashSet::new())),
            pending: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn tree(&self) -> SharedTree {
        self.tree.clone()
    }

    /// Mark `node` as mounted (measurable).
    pub fn mount(&self, node: NodeId) {
        self.mounted.borrow_mut().insert(node);
    }

    /// Mark `node` as unmounted. Queued requests for it will fail.
    pub fn unmount(&self, node: NodeId) {
        self.mounted.borrow_mut().remove(&node);
    }

    pub fn is_mounted(&self, node: NodeId) -> bool {
        self.mounted.borrow().contains(&node)
    }

    /// Number of requests waiting for `flush()`.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Answer every queued request in request order.
    ///
    /// Requests issued by the callbacks themselves wait for the next flush.
    /// Returns the number of requests answered.
    pub fn flush(&self) -> usize {
        let queue = std::mem::take(&mut *self.pending.borrow_mut());
        self.answer(queue.into_iter())
    }

    /// Answer every queued request, newest first.
    pub fn flush_reversed(&self) -> usize {
        let queue = std::mem::take(&mut *self.pending.borrow_mut());
        self.answer(queue.into_iter().rev())
    }

    /// Measure synchronously, bypassing the queue.
    pub fn measure_now(&self, view: NodeId, container: NodeId) -> Result<LayoutRect, MeasureError> {
        if !self.is_mounted(container) {
            return Err(MeasureError::ContainerUnavailable);
        }
        if !self.is_mounted(view) {
            return Err(MeasureError::NotInTree);
        }

        let tree = self.tree.borrow();
        let layout = tree.layout(view).map_err(|_| MeasureError::NotInTree)?;
        let (left, top) = offset_within(&tree, view, container)?;

        Ok(LayoutRect {
            left,
            top,
            width: layout.size.width,
            height: layout.size.height,
        })
    }

    fn answer(&self, requests: impl Iterator<Item = PendingMeasure>) -> usize {
        let mut answered = 0;
        for request in requests {
            // Tree borrow is released before the callback runs
            let result = self.measure_now(request.view, request.container);
            (request.done)(result);
            answered += 1;
        }
        answered
    }
}

/// Offset of `view`'s origin from `container`'s origin, walking parent links.
fn offset_within(
    tree: &TaffyTree<()>,
    view: NodeId,
    container: NodeId,
) -> Result<(f32, f32), MeasureError> {
    let (mut x, mut y) = (0.0, 0.0);
    let mut current = view;

    while current != container {
        let layout = tree.layout(current).map_err(|_| MeasureError::NotInTree)?;
        x += layout.location.x;
        y += layout.location.y;

        current = tree.parent(current).ok_or(MeasureError::NotDescendant)?;
    }

    Ok((x, y))
}

impl LayoutMeasurer for TaffyMeasurer {
    type Node = NodeId;

    fn resolves(&self, node: &NodeId) -> bool {
        self.is_mounted(*node)
    }

    fn measure_relative_to(&self, view: &NodeId, container: &NodeId, done: MeasureCallback) {
        self.pending.borrow_mut().push_back(PendingMeasure {
            view: *view,
            container: *container,
            done,
        });
    }
}
