//! Sticky View Registry - Measured rects and live handles per sticky view.
//!
//! Manages the lifecycle of sticky view entries:
//! - Handle slots: the live node used to re-measure a view on demand
//! - Rects: last successful measurement, in registration order
//! - Tickets: every measurement request gets one, so a late completion can
//!   never overwrite a newer measurement of the same view
//! - Snapshots: each publish bumps a revision so downstream reactions re-run
//!
//! An id is only part of the stack while it has a rect. A view whose latest
//! measurement failed keeps its handle (so the next re-measure pass retries
//! it) but loses its rect.

use indexmap::IndexMap;

use crate::types::{LayoutRect, StickyPositions, ViewId};

// =============================================================================
// Handle slot
// =============================================================================

/// Live handle for a registered view plus its measurement tickets.
#[derive(Debug, Clone)]
struct HandleSlot<N> {
    handle: N,
    /// Ticket of the most recent measurement request.
    requested: u64,
    /// Ticket of the most recent completion that was applied (0 = none).
    applied: u64,
}

/// Outcome of a completed measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completion {
    Measured(LayoutRect),
    Failed,
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug)]
pub struct StickyRegistry<N> {
    handles: IndexMap<ViewId, HandleSlot<N>>,
    rects: IndexMap<ViewId, LayoutRect>,
    next_ticket: u64,
    revision: u64,
}

impl<N: Clone> Default for StickyRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone> StickyRegistry<N> {
    pub fn new() -> Self {
        Self {
            handles: IndexMap::new(),
            rects: IndexMap::new(),
            next_ticket: 1,
            revision: 0,
        }
    }

    /// Record `handle` for `id` and issue a ticket for a new measurement.
    pub fn track(&mut self, id: &str, handle: N) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        match self.handles.get_mut(id) {
            Some(slot) => {
                slot.handle = handle;
                slot.requested = ticket;
            }
            None => {
                self.handles.insert(
                    id.to_string(),
                    HandleSlot {
                        handle,
                        requested: ticket,
                        applied: 0,
                    },
                );
            }
        }

        ticket
    }

    /// Apply a measurement completion.
    ///
    /// Returns `true` if the registry changed. Completions are dropped when the
    /// id was removed since the request, or when a newer request for the same
    /// id has already completed.
    pub fn complete(&mut self, id: &str, ticket: u64, completion: Completion) -> bool {
        let Some(slot) = self.handles.get_mut(id) else {
            return false;
        };
        if ticket <= slot.applied {
            return false;
        }
        slot.applied = ticket;

        match completion {
            Completion::Measured(rect) => {
                // Existing ids keep their registration position
                self.rects.insert(id.to_string(), rect);
                true
            }
            Completion::Failed => self.rects.shift_remove(id).is_some(),
        }
    }

    /// Forget a view entirely (handle and rect).
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let had_handle = self.handles.shift_remove(id).is_some();
        let had_rect = self.rects.shift_remove(id).is_some();
        had_handle || had_rect
    }

    /// All live handles, in registration order.
    pub fn handles(&self) -> Vec<(ViewId, N)> {
        self.handles
            .iter()
            .map(|(id, slot)| (id.clone(), slot.handle.clone()))
            .collect()
    }

    /// Live handle for a view.
    pub fn handle(&self, id: &str) -> Option<&N> {
        self.handles.get(id).map(|slot| &slot.handle)
    }

    /// Last successful measurement for a view.
    pub fn rect(&self, id: &str) -> Option<&LayoutRect> {
        self.rects.get(id)
    }

    /// True if the view has a pending measurement request.
    pub fn is_pending(&self, id: &str) -> bool {
        self.handles
            .get(id)
            .is_some_and(|slot| slot.requested > slot.applied)
    }

    /// Number of views with a rect.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Build a new snapshot for publication.
    pub fn snapshot(&mut self) -> StickyPositions {
        self.revision += 1;
        StickyPositions {
            revision: self.revision,
            entries: self.rects.clone(),
        }
    }

    /// Drop every entry. Tickets keep counting so stale completions stay stale.
    pub fn clear(&mut self) {
        self.handles.clear();
        self.rects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: f32, height: f32) -> LayoutRect {
        LayoutRect::new(0.0, top, 80.0, height)
    }

    #[test]
    fn test_track_and_complete() {
        let mut registry: StickyRegistry<u32> = StickyRegistry::new();

        let ticket = registry.track("a", 7);
        assert!(registry.is_pending("a"));
        assert!(registry.is_empty());

        assert!(registry.complete("a", ticket, Completion::Measured(rect(10.0, 5.0))));
        assert!(!registry.is_pending("a"));
        assert_eq!(registry.rect("a"), Some(&rect(10.0, 5.0)));
        assert_eq!(registry.handle("a"), Some(&7));
    }

    #[test]
    fn test_stale_completion_dropped() {
        let mut registry: StickyRegistry<u32> = StickyRegistry::new();

        let first = registry.track("a", 1);
        let second = registry.track("a", 1);

        // Newer request finishes first
        assert!(registry.complete("a", second, Completion::Measured(rect(20.0, 5.0))));
        // Older one arrives late and must not win
        assert!(!registry.complete("a", first, Completion::Measured(rect(10.0, 5.0))));

        assert_eq!(registry.rect("a").map(|r| r.top), Some(20.0));
    }

    #[test]
    fn test_completion_after_remove_dropped() {
        let mut registry: StickyRegistry<u32> = StickyRegistry::new();

        let ticket = registry.track("a", 1);
        registry.remove("a");

        assert!(!registry.complete("a", ticket, Completion::Measured(rect(10.0, 5.0))));
        assert!(registry.is_empty());
        assert!(registry.handle("a").is_none());
    }

    #[test]
    fn test_failed_completion_keeps_handle() {
        let mut registry: StickyRegistry<u32> = StickyRegistry::new();

        let ticket = registry.track("a", 1);
        registry.complete("a", ticket, Completion::Measured(rect(10.0, 5.0)));

        let retry = registry.track("a", 1);
        assert!(registry.complete("a", retry, Completion::Failed));

        assert!(registry.rect("a").is_none());
        assert_eq!(registry.handle("a"), Some(&1));
        assert_eq!(registry.handles().len(), 1);
    }

    #[test]
    fn test_registration_order_preserved_on_update() {
        let mut registry: StickyRegistry<u32> = StickyRegistry::new();

        for id in ["a", "b", "c"] {
            let ticket = registry.track(id, 0);
            registry.complete(id, ticket, Completion::Measured(rect(0.0, 1.0)));
        }

        // Re-measure "a": keeps first position
        let ticket = registry.track("a", 0);
        registry.complete("a", ticket, Completion::Measured(rect(99.0, 1.0)));

        let snapshot = registry.snapshot();
        let order: Vec<&str> = snapshot.entries.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["a", "b", "c"]);

        // Remove and re-add "a": goes to the end
        registry.remove("a");
        let ticket = registry.track("a", 0);
        registry.complete("a", ticket, Completion::Measured(rect(0.0, 1.0)));

        let snapshot = registry.snapshot();
        let order: Vec<&str> = snapshot.entries.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_snapshot_revision_increases() {
        let mut registry: StickyRegistry<u32> = StickyRegistry::new();

        let first = registry.snapshot();
        let second = registry.snapshot();

        assert!(second.revision > first.revision);
        assert_ne!(first, second);
        assert_eq!(first.entries, second.entries);
    }

    #[test]
    fn test_clear() {
        let mut registry: StickyRegistry<u32> = StickyRegistry::new();
        let ticket = registry.track("a", 1);
        registry.clear();

        assert!(registry.handles().is_empty());
        assert!(!registry.complete("a", ticket, Completion::Measured(rect(0.0, 1.0))));
    }
}
