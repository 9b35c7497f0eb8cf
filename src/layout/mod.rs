//! Layout Module - Measuring sticky views.
//!
//! - **Measure** - The `LayoutMeasurer` trait the session measures through
//! - **Taffy Bridge** - `TaffyMeasurer`, a queued measurer over a Taffy tree

pub mod measure;
pub mod taffy_bridge;

pub use measure::{LayoutMeasurer, MeasureCallback};
pub use taffy_bridge::{SharedTree, TaffyMeasurer};
