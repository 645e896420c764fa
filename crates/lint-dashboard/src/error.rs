//! Error types.

use crate::host::{ViewId, WindowId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors reported by an [`EditorHost`](crate::EditorHost) implementation.
pub enum HostError {
    #[error("window {0:?} not found")]
    /// The window handle does not refer to an open window.
    WindowNotFound(WindowId),

    #[error("view {0:?} not found")]
    /// The view handle does not refer to an open view.
    ViewNotFound(ViewId),

    #[error("view {0:?} is read-only")]
    /// A content replace was attempted on a read-only view.
    ReadOnly(ViewId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by dashboard operations.
///
/// None of these reach the user: the [`plugin`](crate::plugin) layer logs them and carries on.
pub enum DashboardError {
    #[error("host error: {0}")]
    /// The editor host rejected an operation.
    Host(#[from] HostError),

    #[error("no active window")]
    /// The host has no active window to place or look up the panel in.
    NoActiveWindow,
}
