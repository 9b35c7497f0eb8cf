//! # spark-collapsible
//!
//! Collapsible header and sticky view stacking for reactive UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A scrollable content area sits under a collapsible header. Sticky views
//! inside the content report their layout; the session measures them
//! relative to a reference container, stacks them in order of their rest
//! position, and publishes everything as live signals:
//!
//! ```text
//! sticky views → registry → stacking engine → offsets / first_top / overlapped_height
//! header layout ─┘                                   │
//! scroll_y ──────────────────────────────► header_collapsed, content_min_height
//! ```
//!
//! All state for one screen lives in a [`CollapsibleSession`]. Application
//! code talks to its [`CollapsibleContext`]; the header, sticky views and
//! scroll container use its [`InternalContext`].
//!
//! ## Modules
//!
//! - [`types`] - Core types (LayoutRect, StickyPositions, StickyOffsets, ...)
//! - [`engine`] - Sticky registry and stacking computation
//! - [`layout`] - Measurement trait and the Taffy-backed measurer
//! - [`state`] - Animation, debounce, scroll-derived signals
//! - [`pipeline`] - Session, signals and context surfaces

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{CollapsibleConfig, FIRST_TOP_NONE};
pub use error::MeasureError;

pub use engine::{change_key, compute_stacking, ChangeKey, StackingEngine, StickyRegistry};

pub use layout::{LayoutMeasurer, MeasureCallback, SharedTree, TaffyMeasurer};

pub use state::{
    content_min_height, header_collapsed, AnimatedValue, Debouncer, DerivedReader,
};

pub use pipeline::{
    CollapsibleContext, CollapsibleHandles, CollapsibleSession, InternalContext,
};
