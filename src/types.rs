//! Core types for spark-collapsible.
//!
//! These are the values that flow through the reactive pipeline: measured
//! rectangles, registry snapshots, and the stacking output published to
//! sticky views.

use indexmap::IndexMap;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a sticky view. Unique per sticky view within a session.
pub type ViewId = String;

// =============================================================================
// LayoutRect
// =============================================================================

/// Rectangle of a view relative to the reference container.
///
/// Same units as the container (cells, points, whatever the measurer reports).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bottom edge (`top + height`).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

// =============================================================================
// Registry snapshot
// =============================================================================

/// Published view of the sticky registry.
///
/// Entries are in registration order. `revision` increases on every publish,
/// so two snapshots with identical entries are still distinct values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StickyPositions {
    pub revision: u64,
    pub entries: IndexMap<ViewId, LayoutRect>,
}

impl StickyPositions {
    /// Rect for a view, if it is currently measured.
    pub fn get(&self, id: &str) -> Option<&LayoutRect> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every entry's `top`.
    pub fn top_sum(&self) -> f32 {
        self.entries.values().map(|rect| rect.top).sum()
    }
}

// =============================================================================
// Stacking output
// =============================================================================

/// Stacked offset per sticky view, in stacking order.
///
/// The key order of `offsets` is the stacking order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StickyOffsets {
    pub offsets: IndexMap<ViewId, f32>,
}

impl StickyOffsets {
    /// Stacked offset for a view.
    pub fn get(&self, id: &str) -> Option<f32> {
        self.offsets.get(id).copied()
    }

    /// Identifiers in stacking order.
    pub fn order(&self) -> Vec<ViewId> {
        self.offsets.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Full output of one stacking pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StackingResult {
    /// Ids sorted ascending by `top`, ties in registration order.
    pub order: Vec<ViewId>,
    /// Cumulative stacked offset per id.
    pub offsets: StickyOffsets,
    /// `top` of the first view in `order`, or the "none" sentinel.
    pub first_top: f32,
    /// Sum of heights of views whose `top` is above the fixed header height.
    pub overlapped_height: f32,
}

// =============================================================================
// Imperative handle parameters
// =============================================================================

/// Parameters for `scroll_to_index`, forwarded untouched to the handle set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollToIndexParams {
    /// Item index in the scroll container.
    pub index: usize,
    /// Animate the scroll. `None` leaves the choice to the handler.
    pub animated: Option<bool>,
    /// Fixed offset added to the item position.
    pub view_offset: Option<f32>,
    /// 0 = item at top, 0.5 = centered, 1 = item at bottom.
    pub view_position: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_bottom() {
        let rect = LayoutRect::new(0.0, 10.0, 80.0, 5.0);
        assert_eq!(rect.bottom(), 15.0);
    }

    #[test]
    fn test_positions_top_sum() {
        let mut positions = StickyPositions::default();
        assert_eq!(positions.top_sum(), 0.0);

        positions.entries.insert("a".into(), LayoutRect::new(0.0, 10.0, 10.0, 5.0));
        positions.entries.insert("b".into(), LayoutRect::new(0.0, 32.0, 10.0, 5.0));
        assert_eq!(positions.top_sum(), 42.0);
        assert_eq!(positions.len(), 2);
    }

    #[test]
    fn test_offsets_order_follows_insertion() {
        let mut offsets = StickyOffsets::default();
        offsets.offsets.insert("z".into(), 0.0);
        offsets.offsets.insert("a".into(), 4.0);

        assert_eq!(offsets.order(), vec!["z".to_string(), "a".to_string()]);
        assert_eq!(offsets.get("a"), Some(4.0));
        assert_eq!(offsets.get("missing"), None);
    }
}
