//! Selection range and the drag/bounds state machine that edits it

use crate::{CropError, Result, utils::clamp_index};
use std::ops::Range;

/// Half-open index interval `[start, end)` over a track store
///
/// Always satisfies `start <= end`; the owning [`SelectionModel`] keeps `end <= len`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    /// The whole track: `[0, len)`
    pub fn full(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    /// Build a range, rejecting anything outside `0 <= start <= end <= len`
    pub fn checked(start: usize, end: usize, len: usize) -> Result<Self> {
        if start > end || end > len {
            return Err(CropError::Range { start, end, len });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    #[inline]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Shrink the range so that it fits a track of `len` points
    pub fn clamped(&self, len: usize) -> Self {
        let end = self.end.min(len);
        Self {
            start: self.start.min(end),
            end,
        }
    }
}

/// Whether a drag is in progress, and where it started
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        anchor: usize,
    },
}

/// State machine owning the current selection of one loaded track
///
/// Drag edits and direct bound edits both go through here, so the selection can only
/// change through validated transitions. The dragged endpoint is part of the selection:
/// dragging from `a` to `b` selects `[min(a, b), max(a, b) + 1)`.
#[derive(Clone, Debug)]
pub struct SelectionModel {
    len: usize,
    range: SelectionRange,
    drag: DragState,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl SelectionModel {
    /// Create a model for a track of `len` points, selecting everything
    pub fn new(len: usize) -> Self {
        Self {
            len,
            range: SelectionRange::full(len),
            drag: DragState::Idle,
        }
    }

    #[inline]
    pub fn range(&self) -> SelectionRange {
        self.range
    }

    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Number of points of the track this model selects from
    #[inline]
    pub fn track_len(&self) -> usize {
        self.len
    }

    /// Start a drag anchored at `index` (clamped into the track)
    ///
    /// The selection itself is left alone until the first update. Returns the anchor, or
    /// `None` on an empty track where nothing can be selected.
    pub fn begin_drag(&mut self, index: i64) -> Option<usize> {
        let anchor = clamp_index(index, self.len)?;
        if self.is_dragging() {
            tracing::debug!("Restarting drag at {anchor}");
        }
        self.drag = DragState::Dragging { anchor };
        Some(anchor)
    }

    /// Extend the drag to `index`, replacing the selection
    ///
    /// Ignored (returns `None`) when no drag is in progress.
    pub fn update_drag(&mut self, index: i64) -> Option<SelectionRange> {
        let DragState::Dragging { anchor } = self.drag else {
            tracing::debug!("Ignoring drag update at {index} without an active drag");
            return None;
        };
        let current = clamp_index(index, self.len)?;
        self.range = SelectionRange {
            start: anchor.min(current),
            end: anchor.max(current) + 1,
        };
        Some(self.range)
    }

    /// Finish the drag at `index`, fixing the selection
    pub fn end_drag(&mut self, index: i64) -> Option<SelectionRange> {
        let range = self.update_drag(index)?;
        self.drag = DragState::Idle;
        tracing::debug!("Drag finished with selection [{}, {})", range.start, range.end);
        Some(range)
    }

    /// Drop an active drag without touching the selection
    ///
    /// Returns whether a drag was in progress.
    pub fn cancel_drag(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.drag = DragState::Idle;
        was_dragging
    }

    /// Replace the selection with `[start, end)` typed in directly
    ///
    /// Requires `start < end <= len`; on failure the selection is unchanged. Any drag in
    /// progress is left running.
    pub fn set_bounds(&mut self, start: usize, end: usize) -> Result<SelectionRange> {
        if start >= end || end > self.len {
            return Err(CropError::Range {
                start,
                end,
                len: self.len,
            });
        }
        self.range = SelectionRange { start, end };
        Ok(self.range)
    }

    /// Select the whole track again and cancel any drag
    pub fn reset(&mut self) -> SelectionRange {
        self.range = SelectionRange::full(self.len);
        self.drag = DragState::Idle;
        self.range
    }

    /// Reset for a track of a different length
    pub fn reset_to(&mut self, len: usize) -> SelectionRange {
        self.len = len;
        self.reset()
    }
}
