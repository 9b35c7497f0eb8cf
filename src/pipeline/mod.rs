//! Reactive Pipeline
//!
//! Connects layout reports to the published signals.
//!
//! # Pipeline Architecture
//!
//! ```text
//! report_layout → measure (async) → registry → snapshot signal
//!                                                  │
//!                    header layout ──► change key ─┴─► stacking engine
//!                                                        │
//!                          sticky_offsets / first_top / overlapped_height
//!                                                        │
//!          scroll_y ──► header_collapsed, content_min_height (deriveds)
//! ```
//!
//! ## Key Design Principles
//!
//! - **Gated recompute**: stacking reruns only when `Σ top - header_height` moves
//! - **Pure deriveds**: `header_collapsed` and `content_min_height` are never stored
//! - **Weak completions**: measurements finishing after teardown are dropped

pub mod context;
pub mod session;
pub mod signals;

pub use context::{CollapsibleContext, CollapsibleHandles, HandlerSlot, InternalContext};
pub use session::CollapsibleSession;
pub use signals::{create_signals, CollapsibleSignals};
