//! Scroll State - Signals derived from the live scroll position.
//!
//! Two values, both pure arithmetic over live signals:
//! - `header_collapsed = scroll_y >= fixed_header_height - first_top`
//! - `content_min_height = container_height + fixed_header_height - overlapped_height`
//!
//! The header counts as collapsed once the scroll offset has eaten the gap
//! between the header and the first sticky view's rest position, i.e. the
//! first sticky view is about to pin. The minimum content height keeps the
//! scrollable area tall enough for the last content to scroll fully under
//! the header, net of what the stacked views already cover.
//!
//! Neither is stored. The `create_*` functions wrap the formulas in deriveds
//! so readers re-evaluate lazily whenever a dependency changed.

use std::fmt;
use std::rc::Rc;

use spark_signals::{derived, Signal};

// =============================================================================
// PURE FORMULAS
// =============================================================================

/// Whether the header is collapsed at `scroll_y`.
pub fn header_collapsed(scroll_y: f32, fixed_header_height: f32, first_top: f32) -> bool {
    scroll_y >= fixed_header_height - first_top
}

/// Minimum height of the scrollable content.
pub fn content_min_height(
    container_height: f32,
    fixed_header_height: f32,
    overlapped_height: f32,
) -> f32 {
    container_height + fixed_header_height - overlapped_height
}

// =============================================================================
// DERIVED READERS
// =============================================================================

/// Read-only handle over a derived value.
///
/// Reading inside another derived or effect tracks the underlying dependencies.
pub struct DerivedReader<T> {
    read: Rc<dyn Fn() -> T>,
}

impl<T> DerivedReader<T> {
    pub fn new(read: impl Fn() -> T + 'static) -> Self {
        Self {
            read: Rc::new(read),
        }
    }

    pub fn get(&self) -> T {
        (self.read)()
    }
}

impl<T> Clone for DerivedReader<T> {
    fn clone(&self) -> Self {
        Self {
            read: self.read.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DerivedReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DerivedReader").field(&self.get()).finish()
    }
}

/// Create the `header_collapsed` derived.
pub fn create_header_collapsed_derived(
    scroll_y: Signal<f32>,
    fixed_header_height: Signal<f32>,
    first_top: Signal<f32>,
) -> DerivedReader<bool> {
    let collapsed = derived(move || {
        header_collapsed(scroll_y.get(), fixed_header_height.get(), first_top.get())
    });
    DerivedReader::new(move || collapsed.get())
}

/// Create the `content_min_height` derived.
pub fn create_content_min_height_derived(
    container_height: Signal<f32>,
    fixed_header_height: Signal<f32>,
    overlapped_height: Signal<f32>,
) -> DerivedReader<f32> {
    let min_height = derived(move || {
        content_min_height(
            container_height.get(),
            fixed_header_height.get(),
            overlapped_height.get(),
        )
    });
    DerivedReader::new(move || min_height.get())
}
