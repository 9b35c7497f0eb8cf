//! Measurement primitive - how sticky views get their rects.
//!
//! The host layout system answers "where is this view relative to that
//! container" asynchronously: the request goes out now, the answer comes back
//! through a callback at some later point, possibly after other events and in
//! any order relative to other requests.

use std::fmt;

use crate::error::MeasureError;
use crate::types::LayoutRect;

/// Completion for a measurement request.
pub type MeasureCallback = Box<dyn FnOnce(Result<LayoutRect, MeasureError>)>;

/// Host layout system seen from the collapsible session.
pub trait LayoutMeasurer {
    /// Live reference to a mounted view.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// Whether `node` currently refers to a mounted, measurable view.
    fn resolves(&self, node: &Self::Node) -> bool;

    /// Measure `view` relative to `container` and call `done` with the result.
    ///
    /// `done` may run before this returns or at any later point. It must be
    /// called at most once.
    fn measure_relative_to(&self, view: &Self::Node, container: &Self::Node, done: MeasureCallback);
}
