//! Collapsible Session - Owns the state of one collapsible screen.
//!
//! The session wires the registry, stacking engine, debounce and animation
//! into the signal set, and hands out the two context surfaces:
//! - [`CollapsibleContext`] for application code
//! - [`InternalContext`] for the header, sticky views and scroll container
//!
//! # Example
//!
//! ```ignore
//! use spark_collapsible::{CollapsibleSession, CollapsibleConfig, TaffyMeasurer};
//!
//! let session = CollapsibleSession::new(measurer.clone(), CollapsibleConfig::default());
//! let internal = session.internal();
//!
//! internal.set_container(Some(container_node));
//! internal.report_layout("section-a", Some(section_a_node));
//! measurer.flush();
//!
//! // Each frame
//! session.tick(Instant::now());
//!
//! // Teardown
//! session.dispose();
//! ```
//!
//! # Event model
//!
//! Everything happens on one thread. Measurement completions arrive through
//! callbacks holding a weak reference to the session; once the session is
//! disposed (or dropped) they are ignored. The re-measure debounce and the
//! header animation only advance in [`CollapsibleSession::tick`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::config::CollapsibleConfig;
use crate::engine::{Completion, StackingEngine, StickyRegistry};
use crate::error::MeasureError;
use crate::layout::LayoutMeasurer;
use crate::state::debounce::Debouncer;
use crate::types::{LayoutRect, StickyPositions};

use super::context::{CollapsibleContext, HandlerSlot, InternalContext};
use super::signals::{create_signals, CollapsibleSignals};

// =============================================================================
// Session State
// =============================================================================

pub(crate) struct SessionState<M: LayoutMeasurer> {
    pub(crate) config: CollapsibleConfig,
    pub(crate) measurer: M,
    pub(crate) signals: CollapsibleSignals,
    pub(crate) handles: HandlerSlot,
    pub(crate) container: RefCell<Option<M::Node>>,
    pub(crate) scroll_view: RefCell<Option<M::Node>>,
    registry: RefCell<StickyRegistry<M::Node>>,
    engine: RefCell<StackingEngine>,
    remeasure: RefCell<Debouncer>,
    disposed: Cell<bool>,
}

impl<M: LayoutMeasurer + 'static> SessionState<M> {
    fn new(measurer: M, config: CollapsibleConfig) -> Self {
        let signals = create_signals(&config);
        Self {
            measurer,
            signals,
            handles: Rc::new(RefCell::new(None)),
            container: RefCell::new(None),
            scroll_view: RefCell::new(None),
            registry: RefCell::new(StickyRegistry::new()),
            engine: RefCell::new(StackingEngine::new(config.clone())),
            remeasure: RefCell::new(Debouncer::new(config.remeasure_delay)),
            disposed: Cell::new(false),
            config,
        }
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Measure `handle` relative to the container, or drop `id` from the
    /// stack if either is not live.
    pub(crate) fn report_layout(self: &Rc<Self>, id: &str, handle: Option<M::Node>) {
        if self.is_disposed() {
            return;
        }

        let container = self.container.borrow().clone();
        let target = match (handle, container) {
            (Some(view), Some(container))
                if self.measurer.resolves(&view) && self.measurer.resolves(&container) =>
            {
                Some((view, container))
            }
            (_, None) => {
                tracing::debug!(id, error = %MeasureError::ContainerUnavailable, "sticky view dropped");
                None
            }
            _ => {
                tracing::debug!(id, error = %MeasureError::ViewUnavailable(id.to_string()), "sticky view dropped");
                None
            }
        };

        let Some((view, container)) = target else {
            self.registry.borrow_mut().remove(id);
            self.publish();
            return;
        };

        let ticket = self.registry.borrow_mut().track(id, view.clone());
        let session = Rc::downgrade(self);
        let id = id.to_string();

        self.measurer.measure_relative_to(
            &view,
            &container,
            Box::new(move |result| {
                let Some(session) = session.upgrade() else {
                    tracing::debug!(id = %id, error = %MeasureError::Disposed, "measurement dropped");
                    return;
                };
                session.complete_measurement(&id, ticket, result);
            }),
        );
    }

    fn complete_measurement(
        &self,
        id: &str,
        ticket: u64,
        result: Result<LayoutRect, MeasureError>,
    ) {
        if self.is_disposed() {
            tracing::debug!(id, error = %MeasureError::Disposed, "measurement dropped");
            return;
        }

        let completion = match result {
            Ok(rect) => Completion::Measured(rect),
            Err(error) => {
                tracing::debug!(id, %error, "measurement failed, view treated as absent");
                Completion::Failed
            }
        };

        let changed = self.registry.borrow_mut().complete(id, ticket, completion);
        if changed {
            self.publish();
        } else {
            tracing::trace!(id, ticket, "stale measurement ignored");
        }
    }

    /// Re-measure every view registered right now.
    fn remeasure_all(self: &Rc<Self>) {
        let handles = self.registry.borrow().handles();
        tracing::debug!(views = handles.len(), "re-measuring sticky views");
        for (id, handle) in handles {
            self.report_layout(&id, Some(handle));
        }
    }

    // =========================================================================
    // Publication
    // =========================================================================

    /// Publish a fresh registry snapshot and restack.
    fn publish(&self) {
        let snapshot = self.registry.borrow_mut().snapshot();
        self.signals.sticky_positions.set(snapshot.clone());
        self.restack(&snapshot);
    }

    /// Run the gated stacking engine against `positions`.
    fn restack(&self, positions: &StickyPositions) {
        let header = self.signals.fixed_header_height.get();
        let result = self.engine.borrow_mut().observe(positions, header);
        if let Some(result) = result {
            self.signals.publish_stacking(result);
        }
    }

    pub(crate) fn stacking_recompute_count(&self) -> usize {
        self.engine.borrow().recompute_count()
    }

    // =========================================================================
    // Header / container callbacks
    // =========================================================================

    pub(crate) fn on_header_layout(&self, height: f32, now: Instant) {
        if self.is_disposed() {
            return;
        }

        // First layout snaps, later ones animate
        let duration = if self.signals.fixed_header_height.get() == 0.0 {
            Duration::ZERO
        } else {
            self.config.header_animation
        };
        self.signals.header_height.animate_to(height, duration, now);
        self.signals.fixed_header_height.set(height);

        let positions = self.signals.sticky_positions.get();
        self.restack(&positions);

        self.remeasure.borrow_mut().schedule(now);
    }

    pub(crate) fn on_container_height(&self, height: f32) {
        if self.is_disposed() {
            return;
        }
        self.signals.container_height.set(height);
    }

    pub(crate) fn set_scroll_y(&self, scroll_y: f32) {
        if self.is_disposed() {
            return;
        }
        self.signals.scroll_y.set(scroll_y);
    }

    pub(crate) fn remeasure_pending(&self) -> bool {
        self.remeasure.borrow().is_pending()
    }

    // =========================================================================
    // Frame / teardown
    // =========================================================================

    fn tick(self: &Rc<Self>, now: Instant) {
        if self.is_disposed() {
            return;
        }

        self.signals.header_height.tick(now);

        let fire = self.remeasure.borrow_mut().poll(now);
        if fire {
            self.remeasure_all();
        }
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.remeasure.borrow_mut().dispose();
        self.handles.borrow_mut().take();
        self.registry.borrow_mut().clear();
        tracing::debug!("collapsible session disposed");
    }
}

// =============================================================================
// Session Handle
// =============================================================================

/// Handle owning one collapsible session.
///
/// Dropping the handle disposes the session; contexts handed out earlier
/// stay valid but become inert.
pub struct CollapsibleSession<M: LayoutMeasurer + 'static> {
    state: Rc<SessionState<M>>,
}

impl<M: LayoutMeasurer + 'static> CollapsibleSession<M> {
    pub fn new(measurer: M, config: CollapsibleConfig) -> Self {
        Self {
            state: Rc::new(SessionState::new(measurer, config)),
        }
    }

    /// Public surface for application code.
    pub fn context(&self) -> CollapsibleContext {
        CollapsibleContext::new(
            self.state.handles.clone(),
            self.state.signals.header_height.signal(),
            self.state.signals.scroll_y.clone(),
            self.state.signals.header_collapsed.clone(),
        )
    }

    /// Internal surface for the header, sticky views and scroll container.
    pub fn internal(&self) -> InternalContext<M> {
        InternalContext::new(self.state.clone())
    }

    /// Advance the header animation and fire a due re-measure.
    pub fn tick(&self, now: Instant) {
        self.state.tick(now);
    }

    /// Tear down: cancel the pending re-measure, drop the handle set and the
    /// registry, and ignore every measurement still in flight.
    pub fn dispose(&self) {
        self.state.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.state.is_disposed()
    }

    pub fn config(&self) -> &CollapsibleConfig {
        &self.state.config
    }
}

impl<M: LayoutMeasurer + 'static> Drop for CollapsibleSession<M> {
    fn drop(&mut self) {
        self.state.dispose();
    }
}
