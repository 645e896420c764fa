//! Jumping from a dashboard line to its source location.

use crate::error::HostError;
use crate::format::{NavTarget, NavigationIndex};
use crate::host::{EditorHost, Region, ShowMode, ViewId};

/// How a navigation moves the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Focus the target document and center the location.
    Jump,
    /// Reveal the location in the target document while focus stays on the dashboard.
    Peek,
}

impl NavigationMode {
    fn show_mode(self) -> ShowMode {
        match self {
            NavigationMode::Jump => ShowMode::Centered,
            NavigationMode::Peek => ShowMode::Visible,
        }
    }
}

/// Navigate to the source location behind dashboard line `cursor.0`.
///
/// Lines outside `index`, and lines whose entry is `None` (headers, separators, help text),
/// are inert: nothing changes and `Ok(None)` is returned. The cursor column does not matter.
pub fn focus_from_cursor<H: EditorHost + ?Sized>(
    host: &mut H,
    index: &NavigationIndex,
    cursor: (usize, usize),
    mode: NavigationMode,
) -> Result<Option<NavTarget>, HostError> {
    let (cursor_line, _) = cursor;
    let Some(target) = index.get(cursor_line).copied() else {
        tracing::trace!(cursor_line, "dashboard line is not navigable");
        return Ok(None);
    };

    if mode == NavigationMode::Jump {
        host.focus_view(target.view)?;
    }

    if let Some(line) = target.line {
        let point = host.text_point(target.view, line, target.column.unwrap_or(0))?;
        host.show(target.view, point, mode.show_mode())?;
        host.set_selection(target.view, Region::caret(point))?;
    }

    tracing::trace!(
        view = target.view.get(),
        line = ?target.line,
        column = ?target.column,
        ?mode,
        "navigated from dashboard"
    );
    Ok(Some(target))
}

/// Navigate from the primary caret of `panel`.
///
/// A panel without selections is inert, like a non-navigable line.
pub fn focus_from_selection<H: EditorHost + ?Sized>(
    host: &mut H,
    index: &NavigationIndex,
    panel: ViewId,
    mode: NavigationMode,
) -> Result<Option<NavTarget>, HostError> {
    let Some(primary) = host.selections(panel)?.first().copied() else {
        return Ok(None);
    };
    let cursor = host.row_col(panel, primary.a)?;
    focus_from_cursor(host, index, cursor, mode)
}
