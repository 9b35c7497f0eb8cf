//! Session configuration.
//!
//! Construct with struct literal syntax:
//! ```ignore
//! let config = CollapsibleConfig {
//!     remeasure_delay: Duration::from_millis(100),
//!     ..Default::default()
//! };
//! ```

use std::time::Duration;

/// Quiet window before sticky views are re-measured after a header resize.
pub const DEFAULT_REMEASURE_DELAY: Duration = Duration::from_millis(200);

/// Header height animation after the first layout.
pub const DEFAULT_HEADER_ANIMATION: Duration = Duration::from_millis(10);

/// Overlap between consecutive stacked views. Keeps a 1-unit seam from
/// showing between pinned views while scrolling back up.
pub const DEFAULT_STICKY_OVERLAP: f32 = 1.0;

/// `first_top` value meaning "no sticky view registered".
pub const FIRST_TOP_NONE: f32 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CollapsibleConfig {
    pub remeasure_delay: Duration,
    pub header_animation: Duration,
    pub sticky_overlap: f32,
    pub first_top_sentinel: f32,
}

impl Default for CollapsibleConfig {
    fn default() -> Self {
        Self {
            remeasure_delay: DEFAULT_REMEASURE_DELAY,
            header_animation: DEFAULT_HEADER_ANIMATION,
            sticky_overlap: DEFAULT_STICKY_OVERLAP,
            first_top_sentinel: FIRST_TOP_NONE,
        }
    }
}
