//! Arena handles and invalidation flags
//!
//! Canvases, paints and drawables live in slot-map arenas and are referred
//! to by these keys. Per-canvas state held by a paint is keyed by
//! `CanvasId`, never by pointer identity.

use slotmap::new_key_type;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

new_key_type! {
    /// Handle to a rendering surface
    pub struct CanvasId;
    /// Handle to a paint task
    pub struct PaintId;
    /// Handle to a drawable geometry
    pub struct DrawableId;
}

/// Shared "needs redraw" flag polled by a frame loop
pub type DirtyFlag = Arc<AtomicBool>;

/// Create a new dirty flag, initially set so the first frame is drawn
pub fn dirty_flag() -> DirtyFlag {
    Arc::new(AtomicBool::new(true))
}
