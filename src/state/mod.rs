//! State Module - Time and scroll driven state.
//!
//! - **Animate** - Signals tweened toward a target (header height)
//! - **Debounce** - Trailing-edge coalescing (re-measure after header resize)
//! - **Scroll** - `header_collapsed` and `content_min_height` deriveds

pub mod animate;
pub mod debounce;
pub mod scroll;

pub use animate::AnimatedValue;
pub use debounce::Debouncer;
pub use scroll::*;
