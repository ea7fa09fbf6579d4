//! Motion canvas state
//!
//! A `CoreMotionCanvas` is one rendering surface's view of the stage: the
//! paint tasks attached to it, its validity, the dirty flag a frame loop
//! polls and the stats of its last frame. Geometry sets and clip
//! rectangles live on the paints, keyed by the canvas handle, so a single
//! paint can serve several canvases.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering;
use std::time::Duration;
use vellum_core::{dirty_flag, DirtyFlag, PaintId};

/// Statistics of the frames drawn on one canvas
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frames_drawn: u64,
    /// Clock value (ms) the last frame was drawn at
    pub last_frame_time: u64,
    /// Wall time spent in the last `draw_frame`
    pub last_frame_duration: Duration,
    pub paints_drawn: usize,
    pub geometries_drawn: usize,
}

/// Per-surface paint task list and invalidation state
#[derive(Debug)]
pub struct CoreMotionCanvas {
    paint_tasks: IndexSet<PaintId, FxBuildHasher>,
    is_valid: bool,
    dirty: DirtyFlag,
    stats: FrameStats,
}

impl CoreMotionCanvas {
    pub(crate) fn new() -> Self {
        Self {
            paint_tasks: IndexSet::default(),
            is_valid: false,
            dirty: dirty_flag(),
            stats: FrameStats::default(),
        }
    }

    /// True when the last frame left nothing animating and nothing changed since
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Request a redraw
    pub fn invalidate(&mut self) {
        self.is_valid = false;
        self.dirty.store(true, Ordering::Release);
    }

    /// Flag a `FrameLoop` polls to decide whether to draw
    pub fn dirty_flag(&self) -> DirtyFlag {
        DirtyFlag::clone(&self.dirty)
    }

    /// Paint tasks in the order they were attached
    pub fn paint_tasks(&self) -> impl Iterator<Item = PaintId> + '_ {
        self.paint_tasks.iter().copied()
    }

    pub fn paint_task_count(&self) -> usize {
        self.paint_tasks.len()
    }

    pub fn contains_paint_task(&self, paint: PaintId) -> bool {
        self.paint_tasks.contains(&paint)
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub(crate) fn insert_task(&mut self, paint: PaintId) -> bool {
        let inserted = self.paint_tasks.insert(paint);
        self.invalidate();
        inserted
    }

    pub(crate) fn remove_task(&mut self, paint: PaintId) -> bool {
        let removed = self.paint_tasks.shift_remove(&paint);
        self.invalidate();
        removed
    }

    pub(crate) fn take_tasks(&mut self) -> Vec<PaintId> {
        self.invalidate();
        self.paint_tasks.drain(..).collect()
    }

    pub(crate) fn finish_frame(&mut self, is_valid: bool, stats: FrameStats) {
        self.is_valid = is_valid;
        self.dirty.store(!is_valid, Ordering::Release);
        self.stats = stats;
    }
}
