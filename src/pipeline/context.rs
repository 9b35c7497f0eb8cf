//! Context surfaces handed out by a collapsible session.
//!
//! # Public
//!
//! [`CollapsibleContext`] is what application code sees: imperative
//! collapse/expand/scroll calls that forward to whatever [`CollapsibleHandles`]
//! the scroll container registered, plus read-only `header_height`,
//! `scroll_y` and `header_collapsed`. Calls made before any handle set is
//! registered do nothing.
//!
//! # Internal
//!
//! [`InternalContext`] is for the layout collaborators: the header reports
//! its height, sticky views report their handles, the scroll container
//! reports scroll position and container height and reads back the stacking
//! output and `content_min_height`.
//!
//! Getters read signals, so calling them inside a derived or effect tracks
//! the underlying value.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use spark_signals::Signal;

use crate::layout::LayoutMeasurer;
use crate::state::scroll::DerivedReader;
use crate::types::{ScrollToIndexParams, StickyOffsets, StickyPositions};

use super::session::SessionState;

// =============================================================================
// Imperative handles
// =============================================================================

/// Imperative control implemented by the scroll container.
pub trait CollapsibleHandles {
    fn collapse(&self, animated: Option<bool>);
    fn expand(&self);
    fn scroll_to(&self, offset: f32, animate: Option<bool>);
    fn scroll_to_index(&self, params: ScrollToIndexParams);
}

/// Slot holding the registered handle set, shared by both surfaces.
pub type HandlerSlot = Rc<RefCell<Option<Rc<dyn CollapsibleHandles>>>>;

// =============================================================================
// Public context
// =============================================================================

#[derive(Clone)]
pub struct CollapsibleContext {
    handles: HandlerSlot,
    header_height: Signal<f32>,
    scroll_y: Signal<f32>,
    header_collapsed: DerivedReader<bool>,
}

impl CollapsibleContext {
    pub(crate) fn new(
        handles: HandlerSlot,
        header_height: Signal<f32>,
        scroll_y: Signal<f32>,
        header_collapsed: DerivedReader<bool>,
    ) -> Self {
        Self {
            handles,
            header_height,
            scroll_y,
            header_collapsed,
        }
    }

    pub fn collapse(&self, animated: Option<bool>) {
        self.with_handles("collapse", |handles| handles.collapse(animated));
    }

    pub fn expand(&self) {
        self.with_handles("expand", |handles| handles.expand());
    }

    pub fn scroll_to(&self, offset: f32, animate: Option<bool>) {
        self.with_handles("scroll_to", |handles| handles.scroll_to(offset, animate));
    }

    pub fn scroll_to_index(&self, params: ScrollToIndexParams) {
        self.with_handles("scroll_to_index", |handles| handles.scroll_to_index(params));
    }

    /// Published (animated) header height.
    pub fn header_height(&self) -> f32 {
        self.header_height.get()
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y.get()
    }

    pub fn header_collapsed(&self) -> bool {
        self.header_collapsed.get()
    }

    /// True once a handle set is registered.
    pub fn has_handles(&self) -> bool {
        self.handles.borrow().is_some()
    }

    fn with_handles(&self, call: &str, f: impl FnOnce(&dyn CollapsibleHandles)) {
        // Clone out so the handler may re-register handles while running
        let handles = self.handles.borrow().clone();
        match handles {
            Some(handles) => f(handles.as_ref()),
            None => tracing::trace!(call, "no collapsible handles registered, ignoring"),
        }
    }
}

// =============================================================================
// Internal context
// =============================================================================

pub struct InternalContext<M: LayoutMeasurer + 'static> {
    state: Rc<SessionState<M>>,
}

impl<M: LayoutMeasurer + 'static> Clone for InternalContext<M> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<M: LayoutMeasurer + 'static> InternalContext<M> {
    pub(crate) fn new(state: Rc<SessionState<M>>) -> Self {
        Self { state }
    }

    // -------------------------------------------------------------------------
    // References
    // -------------------------------------------------------------------------

    /// Set (or clear) the reference container sticky views are measured in.
    pub fn set_container(&self, container: Option<M::Node>) {
        *self.state.container.borrow_mut() = container;
    }

    pub fn container(&self) -> Option<M::Node> {
        self.state.container.borrow().clone()
    }

    pub fn set_scroll_view(&self, scroll_view: Option<M::Node>) {
        *self.state.scroll_view.borrow_mut() = scroll_view;
    }

    pub fn scroll_view(&self) -> Option<M::Node> {
        self.state.scroll_view.borrow().clone()
    }

    /// Register the scroll container's imperative handles. `None` unregisters.
    pub fn set_handles(&self, handles: Option<Rc<dyn CollapsibleHandles>>) {
        if self.state.is_disposed() {
            return;
        }
        *self.state.handles.borrow_mut() = handles;
    }

    // -------------------------------------------------------------------------
    // Layout callbacks
    // -------------------------------------------------------------------------

    /// Report a sticky view's handle. `None` (unmount) drops it from the stack.
    pub fn report_layout(&self, id: &str, handle: Option<M::Node>) {
        self.state.report_layout(id, handle);
    }

    /// Header container laid out at `height`.
    ///
    /// Animates the published header height (instantly on the first layout),
    /// updates the fixed header height and schedules a re-measure of every
    /// sticky view.
    pub fn on_header_layout(&self, height: f32, now: Instant) {
        self.state.on_header_layout(height, now);
    }

    pub fn on_container_height(&self, height: f32) {
        self.state.on_container_height(height);
    }

    pub fn set_scroll_y(&self, scroll_y: f32) {
        self.state.set_scroll_y(scroll_y);
    }

    // -------------------------------------------------------------------------
    // Published values
    // -------------------------------------------------------------------------

    pub fn first_top(&self) -> f32 {
        self.state.signals.first_top.get()
    }

    pub fn sticky_offsets(&self) -> StickyOffsets {
        self.state.signals.sticky_offsets.get()
    }

    /// Stacked offset for one sticky view.
    pub fn sticky_offset(&self, id: &str) -> Option<f32> {
        self.state.signals.sticky_offsets.get().get(id)
    }

    pub fn sticky_positions(&self) -> StickyPositions {
        self.state.signals.sticky_positions.get()
    }

    pub fn fixed_header_height(&self) -> f32 {
        self.state.signals.fixed_header_height.get()
    }

    pub fn header_height(&self) -> f32 {
        self.state.signals.header_height.get()
    }

    pub fn overlapped_height(&self) -> f32 {
        self.state.signals.overlapped_height.get()
    }

    pub fn container_height(&self) -> f32 {
        self.state.signals.container_height.get()
    }

    pub fn content_min_height(&self) -> f32 {
        self.state.signals.content_min_height.get()
    }

    pub fn header_collapsed(&self) -> bool {
        self.state.signals.header_collapsed.get()
    }

    pub fn scroll_y(&self) -> f32 {
        self.state.signals.scroll_y.get()
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    /// True while a debounced re-measure is waiting for its quiet window.
    pub fn remeasure_pending(&self) -> bool {
        self.state.remeasure_pending()
    }

    /// How many times the stacking engine actually recomputed.
    pub fn stacking_recompute_count(&self) -> usize {
        self.state.stacking_recompute_count()
    }

    pub fn is_disposed(&self) -> bool {
        self.state.is_disposed()
    }
}
