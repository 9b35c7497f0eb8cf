//! Session Signals - The live values a collapsible session publishes.
//!
//! Creates every signal and derived of one session in one place:
//!
//! ```text
//! header layout ──► header_height (animated), fixed_header_height
//! scroll container ──► scroll_y, container_height
//! registry publish ──► sticky_positions
//! stacking engine ──► sticky_offsets, first_top, overlapped_height
//!
//! header_collapsed   = derived(scroll_y, fixed_header_height, first_top)
//! content_min_height = derived(container_height, fixed_header_height, overlapped_height)
//! ```

use spark_signals::{signal, Signal};

use crate::config::CollapsibleConfig;
use crate::state::animate::AnimatedValue;
use crate::state::scroll::{
    create_content_min_height_derived, create_header_collapsed_derived, DerivedReader,
};
use crate::types::{StackingResult, StickyOffsets, StickyPositions};

pub struct CollapsibleSignals {
    /// Published header height, animated toward the latest layout.
    pub header_height: AnimatedValue,
    /// Header height as last laid out (not animated).
    pub fixed_header_height: Signal<f32>,
    pub scroll_y: Signal<f32>,
    pub container_height: Signal<f32>,

    pub sticky_positions: Signal<StickyPositions>,
    pub sticky_offsets: Signal<StickyOffsets>,
    pub first_top: Signal<f32>,
    pub overlapped_height: Signal<f32>,

    pub header_collapsed: DerivedReader<bool>,
    pub content_min_height: DerivedReader<f32>,
}

impl CollapsibleSignals {
    /// Publish a stacking pass.
    pub fn publish_stacking(&self, result: StackingResult) {
        self.first_top.set(result.first_top);
        self.overlapped_height.set(result.overlapped_height);
        self.sticky_offsets.set(result.offsets);
    }
}

/// Create the signal set for a session.
pub fn create_signals(config: &CollapsibleConfig) -> CollapsibleSignals {
    let fixed_header_height = signal(0.0f32);
    let scroll_y = signal(0.0f32);
    let container_height = signal(0.0f32);
    let first_top = signal(config.first_top_sentinel);
    let overlapped_height = signal(0.0f32);

    let header_collapsed = create_header_collapsed_derived(
        scroll_y.clone(),
        fixed_header_height.clone(),
        first_top.clone(),
    );
    let content_min_height = create_content_min_height_derived(
        container_height.clone(),
        fixed_header_height.clone(),
        overlapped_height.clone(),
    );

    CollapsibleSignals {
        header_height: AnimatedValue::new(0.0),
        fixed_header_height,
        scroll_y,
        container_height,
        sticky_positions: signal(StickyPositions::default()),
        sticky_offsets: signal(StickyOffsets::default()),
        first_top,
        overlapped_height,
        header_collapsed,
        content_min_height,
    }
}
