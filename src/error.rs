//! Error types.
//!
//! Nothing here escapes the public API: every failure degrades to "the view is
//! absent from the stack until its next successful report". The variants exist
//! so measurers can say why, and so the reason shows up in logs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    #[error("reference container is not mounted")]
    ContainerUnavailable,

    #[error("sticky view `{0}` did not resolve to a mounted node")]
    ViewUnavailable(String),

    #[error("node is not part of the layout tree")]
    NotInTree,

    #[error("view is not a descendant of the reference container")]
    NotDescendant,

    #[error("session was disposed before the measurement completed")]
    Disposed,
}
