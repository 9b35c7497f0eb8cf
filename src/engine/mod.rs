//! Sticky Engine - Registry and stacking computation.
//!
//! The engine owns the plain (non-reactive) data structures:
//! - Registry: measured rects and live handles per sticky view
//! - Stacking: order, stacked offsets, first top, header overlap
//!
//! # Architecture
//!
//! ```text
//! report_layout → StickyRegistry → snapshot → StackingEngine (gated) → StackingResult
//! ```
//!
//! Nothing here knows about signals. The pipeline module wires these into the
//! reactive graph.

mod registry;
mod stacking;

pub use registry::*;
pub use stacking::*;
