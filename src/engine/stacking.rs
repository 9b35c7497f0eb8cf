//! Stacking Engine - Order, stacked offsets and header overlap.
//!
//! Given a registry snapshot and the fixed header height, computes:
//! - the stacking order (ascending `top`, ties in registration order)
//! - each view's stacked offset (previous offset + previous height - overlap)
//! - `first_top` (top of the first view, or the "none" sentinel)
//! - `overlapped_height` (heights of views whose `top` is above the header)
//!
//! Recomputation is gated by a cheap change key: `Σ top - header_height`
//! paired with the entry count. Scroll-driven updates that move no sticky
//! view leave the key alone and cost one subtraction. The count makes a view
//! appearing or vanishing at `top == 0` visible to the gate.

use indexmap::IndexMap;

use crate::config::CollapsibleConfig;
use crate::types::{StackingResult, StickyOffsets, StickyPositions};

// =============================================================================
// Pure computation
// =============================================================================

/// Scalar proxy for "the stacking input changed".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeKey {
    /// `Σ top - fixed_header_height`
    pub value: f32,
    /// Number of measured entries.
    pub entries: usize,
}

/// Change key for a snapshot and header height.
///
/// Only entries present in the snapshot contribute; an absent view is not a
/// zero-valued one.
pub fn change_key(positions: &StickyPositions, fixed_header_height: f32) -> ChangeKey {
    ChangeKey {
        value: positions.top_sum() - fixed_header_height,
        entries: positions.len(),
    }
}

/// Compute the full stacking result. Always does the work; see
/// [`StackingEngine`] for the gated version.
pub fn compute_stacking(
    positions: &StickyPositions,
    fixed_header_height: f32,
    config: &CollapsibleConfig,
) -> StackingResult {
    let mut sorted: Vec<_> = positions.entries.iter().collect();
    // Stable sort: equal tops stay in registration order
    sorted.sort_by(|(_, a), (_, b)| a.top.total_cmp(&b.top));

    let mut offsets = IndexMap::with_capacity(sorted.len());
    let mut total = 0.0;
    for (id, rect) in &sorted {
        offsets.insert((*id).clone(), total);
        total += rect.height - config.sticky_overlap;
    }

    let first_top = sorted
        .first()
        .map(|(_, rect)| rect.top)
        .unwrap_or(config.first_top_sentinel);

    let overlapped_height = sorted
        .iter()
        .filter(|(_, rect)| rect.top < fixed_header_height)
        .map(|(_, rect)| rect.height)
        .sum();

    StackingResult {
        order: sorted.iter().map(|(id, _)| (*id).clone()).collect(),
        offsets: StickyOffsets { offsets },
        first_top,
        overlapped_height,
    }
}

// =============================================================================
// Gated engine
// =============================================================================

/// Recomputes stacking only when the change key moves.
#[derive(Debug)]
pub struct StackingEngine {
    config: CollapsibleConfig,
    previous_key: Option<ChangeKey>,
    recomputes: usize,
}

impl StackingEngine {
    pub fn new(config: CollapsibleConfig) -> Self {
        Self {
            config,
            previous_key: None,
            recomputes: 0,
        }
    }

    /// Evaluate the change key and recompute if it differs from the last one.
    ///
    /// Returns `None` when the key is unchanged and nothing was recomputed.
    pub fn observe(
        &mut self,
        positions: &StickyPositions,
        fixed_header_height: f32,
    ) -> Option<StackingResult> {
        let key = change_key(positions, fixed_header_height);
        if self.previous_key == Some(key) {
            tracing::trace!(key = key.value, entries = key.entries, "stacking key unchanged, skipping");
            return None;
        }
        self.previous_key = Some(key);
        self.recomputes += 1;

        let result = compute_stacking(positions, fixed_header_height, &self.config);
        tracing::trace!(
            key = key.value,
            views = result.order.len(),
            first_top = result.first_top,
            overlapped_height = result.overlapped_height,
            "stacking recomputed"
        );
        Some(result)
    }

    /// Number of recomputes performed so far.
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    /// Last change key seen, if any.
    pub fn previous_key(&self) -> Option<ChangeKey> {
        self.previous_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LayoutRect;

    fn positions(entries: &[(&str, f32, f32)]) -> StickyPositions {
        let mut positions = StickyPositions::default();
        for &(id, top, height) in entries {
            positions
                .entries
                .insert(id.to_string(), LayoutRect::new(0.0, top, 80.0, height));
        }
        positions
    }

    fn config() -> CollapsibleConfig {
        CollapsibleConfig::default()
    }

    #[test]
    fn test_empty_registry() {
        let result = compute_stacking(&positions(&[]), 60.0, &config());

        assert!(result.order.is_empty());
        assert!(result.offsets.is_empty());
        assert_eq!(result.first_top, crate::config::FIRST_TOP_NONE);
        assert_eq!(result.overlapped_height, 0.0);
    }

    #[test]
    fn test_single_entry_first_top() {
        let result = compute_stacking(&positions(&[("a", 42.0, 10.0)]), 0.0, &config());

        assert_eq!(result.first_top, 42.0);
        assert_eq!(result.offsets.get("a"), Some(0.0));
    }

    #[test]
    fn test_two_views_under_header() {
        let result = compute_stacking(
            &positions(&[("A", 0.0, 50.0), ("B", 50.0, 40.0)]),
            60.0,
            &config(),
        );

        assert_eq!(result.order, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(result.offsets.get("A"), Some(0.0));
        assert_eq!(result.offsets.get("B"), Some(49.0));
        assert_eq!(result.first_top, 0.0);
        // B's top (50) is above the header (60), so it counts even though
        // its bottom edge extends past it
        assert_eq!(result.overlapped_height, 90.0);
    }

    #[test]
    fn test_after_removing_b() {
        let result = compute_stacking(&positions(&[("A", 0.0, 50.0)]), 60.0, &config());

        assert_eq!(result.order, vec!["A".to_string()]);
        assert_eq!(result.first_top, 0.0);
        assert_eq!(result.overlapped_height, 50.0);
    }

    #[test]
    fn test_sorted_by_top_with_offsets_chain() {
        let result = compute_stacking(
            &positions(&[("c", 300.0, 20.0), ("a", 10.0, 30.0), ("b", 120.0, 25.0)]),
            0.0,
            &config(),
        );

        assert_eq!(
            result.order,
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );

        let input = positions(&[("c", 300.0, 20.0), ("a", 10.0, 30.0), ("b", 120.0, 25.0)]);
        for pair in result.order.windows(2) {
            let prev = result.offsets.get(&pair[0]).unwrap_or_default();
            let next = result.offsets.get(&pair[1]).unwrap_or_default();
            let prev_height = input.get(&pair[0]).map(|r| r.height).unwrap_or_default();
            assert_eq!(next, prev + prev_height - 1.0);
            assert!(next >= prev);
        }
    }

    #[test]
    fn test_equal_tops_keep_registration_order() {
        let result = compute_stacking(
            &positions(&[("second", 10.0, 5.0), ("first", 10.0, 5.0), ("zero", 0.0, 5.0)]),
            0.0,
            &config(),
        );

        assert_eq!(
            result.order,
            vec!["zero".to_string(), "second".to_string(), "first".to_string()]
        );
    }

    #[test]
    fn test_overlap_membership_is_strict() {
        let result = compute_stacking(
            &positions(&[("at", 60.0, 10.0), ("above", 59.0, 7.0), ("below", 61.0, 3.0)]),
            60.0,
            &config(),
        );

        // Only "above" (59 < 60); "at" sits exactly on the boundary
        assert_eq!(result.overlapped_height, 7.0);
    }

    #[test]
    fn test_custom_overlap() {
        let config = CollapsibleConfig {
            sticky_overlap: 0.0,
            ..Default::default()
        };
        let result = compute_stacking(&positions(&[("a", 0.0, 10.0), ("b", 20.0, 10.0)]), 0.0, &config);

        assert_eq!(result.offsets.get("b"), Some(10.0));
    }

    #[test]
    fn test_engine_skips_when_key_unchanged() {
        let mut engine = StackingEngine::new(config());
        let snapshot = positions(&[("a", 0.0, 50.0), ("b", 50.0, 40.0)]);

        assert!(engine.observe(&snapshot, 60.0).is_some());
        assert_eq!(engine.recompute_count(), 1);

        // Same entries, new revision: key unchanged
        let mut republished = snapshot.clone();
        republished.revision += 1;
        assert!(engine.observe(&republished, 60.0).is_none());
        assert_eq!(engine.recompute_count(), 1);
    }

    #[test]
    fn test_engine_recomputes_on_header_change() {
        let mut engine = StackingEngine::new(config());
        let snapshot = positions(&[("a", 0.0, 50.0)]);

        engine.observe(&snapshot, 60.0);
        let result = engine.observe(&snapshot, 20.0);

        assert!(result.is_some());
        assert_eq!(engine.previous_key().map(|k| k.value), Some(-20.0));
        assert_eq!(engine.recompute_count(), 2);
    }

    #[test]
    fn test_engine_first_observation_always_computes() {
        let mut engine = StackingEngine::new(config());

        // Empty registry, zero header: key 0, but there is no previous key
        let result = engine.observe(&positions(&[]), 0.0);

        assert!(result.is_some());
        assert_eq!(engine.recompute_count(), 1);
    }

    #[test]
    fn test_engine_sees_removal_of_zero_top_view() {
        let mut engine = StackingEngine::new(config());

        engine.observe(&positions(&[("a", 0.0, 50.0), ("b", 0.0, 10.0)]), 0.0);
        let result = engine.observe(&positions(&[("a", 0.0, 50.0)]), 0.0);

        assert_eq!(result.map(|r| r.order), Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_engine_ignores_height_only_change() {
        let mut engine = StackingEngine::new(config());

        engine.observe(&positions(&[("a", 10.0, 50.0)]), 0.0);
        let result = engine.observe(&positions(&[("a", 10.0, 80.0)]), 0.0);

        assert!(result.is_none());
    }

    #[test]
    fn test_engine_recomputes_when_view_moves() {
        let mut engine = StackingEngine::new(config());

        engine.observe(&positions(&[("a", 0.0, 50.0)]), 0.0);
        let result = engine.observe(&positions(&[("a", 5.0, 50.0)]), 0.0);

        assert_eq!(result.map(|r| r.first_top), Some(5.0));
    }
}
