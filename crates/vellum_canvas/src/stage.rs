//! Motion stage
//!
//! The stage is the arena that owns every canvas, paint and drawable. All
//! associations between them are made through handles:
//!
//! - a canvas lists the paint tasks attached to it,
//! - a paint keeps, per canvas handle, the drawables it paints there and an
//!   optional clip rectangle,
//! - drawables know nothing about either.
//!
//! `draw_frame` walks a canvas's paint tasks in ascending z-index order and
//! runs one paint pass per task, drawing every geometry of that task before
//! the next task starts. Every canvas reads the stage's clock, so a paint
//! shared between canvases sees one time base.

use slotmap::SlotMap;
use smallvec::SmallVec;
use std::time::Instant;
use vellum_core::{CanvasId, DrawContext, DrawableId, PaintId, Rect};
use vellum_paint::{Drawable, Paint, PaintContext, PaintError};

use crate::canvas::{CoreMotionCanvas, FrameStats};
use crate::config::MotionConfig;
use crate::error::{CanvasError, Result};

/// Owner of canvases, paints and drawables
pub struct MotionStage {
    config: MotionConfig,
    canvases: SlotMap<CanvasId, CoreMotionCanvas>,
    paints: SlotMap<PaintId, Paint>,
    drawables: SlotMap<DrawableId, Box<dyn Drawable>>,
    started_at: Instant,
}

impl MotionStage {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            canvases: SlotMap::with_key(),
            paints: SlotMap::with_key(),
            drawables: SlotMap::with_key(),
            started_at: Instant::now(),
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Milliseconds since the stage was created; the clock `draw_frame` uses
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Canvases
    // ═══════════════════════════════════════════════════════════════════════

    pub fn create_canvas(&mut self) -> CanvasId {
        let id = self.canvases.insert(CoreMotionCanvas::new());
        tracing::debug!("MotionStage: created canvas {:?}", id);
        id
    }

    pub fn canvas(&self, canvas: CanvasId) -> Result<&CoreMotionCanvas> {
        self.canvases
            .get(canvas)
            .ok_or(CanvasError::UnknownCanvas(canvas))
    }

    fn canvas_mut(&mut self, canvas: CanvasId) -> Result<&mut CoreMotionCanvas> {
        self.canvases
            .get_mut(canvas)
            .ok_or(CanvasError::UnknownCanvas(canvas))
    }

    pub fn is_valid(&self, canvas: CanvasId) -> Result<bool> {
        Ok(self.canvas(canvas)?.is_valid())
    }

    pub fn invalidate(&mut self, canvas: CanvasId) -> Result<()> {
        self.canvas_mut(canvas)?.invalidate();
        Ok(())
    }

    /// Tear a canvas down, dropping every paint's state for it
    ///
    /// Paints and drawables stay on the stage; only their associations with
    /// this canvas go away.
    pub fn release_canvas(&mut self, canvas: CanvasId) -> Result<()> {
        self.canvases
            .remove(canvas)
            .ok_or(CanvasError::UnknownCanvas(canvas))?;
        for (_, paint) in self.paints.iter_mut() {
            paint.release_canvas(canvas);
        }
        tracing::debug!("MotionStage: released canvas {:?}", canvas);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Paints & drawables
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_paint(&mut self, mut paint: Paint) -> PaintId {
        if !self.config.antialias {
            paint.set_antialias(false);
        }
        self.paints.insert(paint)
    }

    pub fn paint(&self, paint: PaintId) -> Result<&Paint> {
        self.paints.get(paint).ok_or(CanvasError::UnknownPaint(paint))
    }

    /// Mutable access to a paint; canvases showing it are invalidated
    pub fn paint_mut(&mut self, paint: PaintId) -> Result<&mut Paint> {
        self.check_paint(paint)?;
        for (_, canvas) in self.canvases.iter_mut() {
            if canvas.contains_paint_task(paint) {
                canvas.invalidate();
            }
        }
        self.paints
            .get_mut(paint)
            .ok_or(CanvasError::UnknownPaint(paint))
    }

    /// Remove a paint from the stage and from every canvas it was attached to
    pub fn remove_paint(&mut self, paint: PaintId) -> Result<Paint> {
        let removed = self
            .paints
            .remove(paint)
            .ok_or(CanvasError::UnknownPaint(paint))?;
        for (_, canvas) in self.canvases.iter_mut() {
            if canvas.contains_paint_task(paint) {
                canvas.remove_task(paint);
            }
        }
        Ok(removed)
    }

    /// Add a drawable
    ///
    /// Properties that have no transition yet get the configured default;
    /// transitions set before adding are kept.
    pub fn add_drawable<D: Drawable + 'static>(&mut self, mut drawable: D) -> DrawableId {
        drawable
            .animatable_mut()
            .set_default_transition(self.config.default_animation);
        self.drawables.insert(Box::new(drawable))
    }

    pub fn drawable(&self, drawable: DrawableId) -> Result<&dyn Drawable> {
        self.drawables
            .get(drawable)
            .map(|d| d.as_ref())
            .ok_or(CanvasError::UnknownDrawable(drawable))
    }

    /// Mutable access to a drawable; canvases painting it are invalidated
    pub fn drawable_mut(&mut self, drawable: DrawableId) -> Result<&mut dyn Drawable> {
        if !self.drawables.contains_key(drawable) {
            return Err(CanvasError::UnknownDrawable(drawable));
        }
        for (canvas_id, canvas) in self.canvases.iter_mut() {
            let shown = canvas.paint_tasks().any(|paint| {
                self.paints
                    .get(paint)
                    .is_some_and(|p| p.contains_geometry(canvas_id, drawable))
            });
            if shown {
                canvas.invalidate();
            }
        }
        match self.drawables.get_mut(drawable) {
            Some(target) => Ok(target.as_mut()),
            None => Err(CanvasError::UnknownDrawable(drawable)),
        }
    }

    /// Remove a drawable from the stage and from every paint task
    pub fn remove_drawable(&mut self, drawable: DrawableId) -> Result<Box<dyn Drawable>> {
        let removed = self
            .drawables
            .remove(drawable)
            .ok_or(CanvasError::UnknownDrawable(drawable))?;
        for (canvas_id, canvas) in self.canvases.iter_mut() {
            for paint in canvas.paint_tasks() {
                if let Some(paint) = self.paints.get_mut(paint) {
                    paint.remove_geometry(canvas_id, drawable);
                }
            }
            canvas.invalidate();
        }
        Ok(removed)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Paint tasks
    // ═══════════════════════════════════════════════════════════════════════

    fn check_paint(&self, paint: PaintId) -> Result<()> {
        if self.paints.contains_key(paint) {
            Ok(())
        } else {
            Err(CanvasError::UnknownPaint(paint))
        }
    }

    fn check_drawable(&self, drawable: DrawableId) -> Result<()> {
        if self.drawables.contains_key(drawable) {
            Ok(())
        } else {
            Err(CanvasError::UnknownDrawable(drawable))
        }
    }

    /// Attach a paint to a canvas; returns false if it was already attached
    pub fn add_paint_task(&mut self, canvas: CanvasId, paint: PaintId) -> Result<bool> {
        self.check_paint(paint)?;
        Ok(self.canvas_mut(canvas)?.insert_task(paint))
    }

    /// Detach a paint from a canvas, dropping its geometries and clip there
    pub fn remove_paint_task(&mut self, canvas: CanvasId, paint: PaintId) -> Result<bool> {
        let removed = self.canvas_mut(canvas)?.remove_task(paint);
        if let Some(paint) = self.paints.get_mut(paint) {
            paint.release_canvas(canvas);
        }
        Ok(removed)
    }

    /// Detach every paint from a canvas
    pub fn clear_paint_tasks(&mut self, canvas: CanvasId) -> Result<()> {
        for paint in self.canvas_mut(canvas)?.take_tasks() {
            if let Some(paint) = self.paints.get_mut(paint) {
                paint.release_canvas(canvas);
            }
        }
        Ok(())
    }

    /// Paint tasks attached to a canvas, in attachment order
    pub fn paint_tasks(&self, canvas: CanvasId) -> Result<Vec<PaintId>> {
        Ok(self.canvas(canvas)?.paint_tasks().collect())
    }

    /// Attach `paint` to `canvas` if needed and hand it to the caller
    fn task_paint(&mut self, canvas: CanvasId, paint: PaintId) -> Result<&mut Paint> {
        self.check_paint(paint)?;
        let target = self.canvas_mut(canvas)?;
        if target.contains_paint_task(paint) {
            target.invalidate();
        } else {
            target.insert_task(paint);
            tracing::trace!("MotionStage: attached {:?} to {:?}", paint, canvas);
        }
        self.paints
            .get_mut(paint)
            .ok_or(CanvasError::UnknownPaint(paint))
    }

    /// Register a geometry with a paint on a canvas
    ///
    /// The paint is attached to the canvas if it was not already. Returns
    /// false if the geometry was already registered.
    pub fn add_geometry_to_paint_task(
        &mut self,
        canvas: CanvasId,
        paint: PaintId,
        drawable: DrawableId,
    ) -> Result<bool> {
        self.check_drawable(drawable)?;
        Ok(self.task_paint(canvas, paint)?.add_geometry(canvas, drawable))
    }

    pub fn remove_geometry_from_paint_task(
        &mut self,
        canvas: CanvasId,
        paint: PaintId,
        drawable: DrawableId,
    ) -> Result<bool> {
        self.canvas_mut(canvas)?.invalidate();
        let target = self
            .paints
            .get_mut(paint)
            .ok_or(CanvasError::UnknownPaint(paint))?;
        Ok(target.remove_geometry(canvas, drawable))
    }

    /// Replace the geometries a paint draws on a canvas
    pub fn set_geometries(
        &mut self,
        canvas: CanvasId,
        paint: PaintId,
        drawables: impl IntoIterator<Item = DrawableId>,
    ) -> Result<()> {
        let drawables: SmallVec<[DrawableId; 8]> = drawables.into_iter().collect();
        for drawable in &drawables {
            self.check_drawable(*drawable)?;
        }
        self.task_paint(canvas, paint)?
            .set_geometries(canvas, drawables);
        Ok(())
    }

    pub fn clear_geometries_from_paint_task(
        &mut self,
        canvas: CanvasId,
        paint: PaintId,
    ) -> Result<()> {
        self.canvas_mut(canvas)?.invalidate();
        self.paints
            .get_mut(paint)
            .ok_or(CanvasError::UnknownPaint(paint))?
            .clear_geometries(canvas);
        Ok(())
    }

    /// Geometries a paint draws on a canvas, in registration order
    pub fn geometries(
        &self,
        canvas: CanvasId,
        paint: PaintId,
    ) -> Result<impl Iterator<Item = DrawableId> + '_> {
        self.canvas(canvas)?;
        Ok(self.paint(paint)?.geometries(canvas))
    }

    /// Total geometries registered across the canvas's paint tasks
    pub fn count_geometries(&self, canvas: CanvasId) -> Result<usize> {
        let target = self.canvas(canvas)?;
        Ok(target
            .paint_tasks()
            .filter_map(|paint| self.paints.get(paint))
            .map(|paint| paint.geometry_count(canvas))
            .sum())
    }

    pub fn clip_rectangle(&self, canvas: CanvasId, paint: PaintId) -> Result<Option<Rect>> {
        self.canvas(canvas)?;
        Ok(self.paint(paint)?.clip_rectangle(canvas))
    }

    pub fn set_clip_rectangle(
        &mut self,
        canvas: CanvasId,
        paint: PaintId,
        clip: Option<Rect>,
    ) -> Result<()> {
        self.task_paint(canvas, paint)?
            .set_clip_rectangle(canvas, clip);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Drawing
    // ═══════════════════════════════════════════════════════════════════════

    /// Draw one frame of `canvas` at the stage clock
    pub fn draw_frame(
        &mut self,
        canvas: CanvasId,
        backend: &mut dyn DrawContext,
    ) -> Result<FrameStats> {
        let time = self.elapsed_ms();
        self.draw_frame_at(canvas, backend, time)
    }

    /// Draw one frame of `canvas` with every property read at `time` (ms)
    ///
    /// Paint tasks run in ascending z-index order (attachment order on
    /// ties). Geometries flagged `remove_on_completed` whose transitions
    /// settled this frame are detached afterwards; so are paint tasks with
    /// the same flag once they and their geometries settle.
    ///
    /// A paint or drawable that fails does not abort the frame: the rest of
    /// the tasks are drawn, the canvas stays invalid, the stats are recorded
    /// and the first error is returned.
    pub fn draw_frame_at(
        &mut self,
        canvas: CanvasId,
        backend: &mut dyn DrawContext,
        time: u64,
    ) -> Result<FrameStats> {
        let started = Instant::now();
        let Self {
            config,
            canvases,
            paints,
            drawables,
            ..
        } = self;
        let target = canvases
            .get_mut(canvas)
            .ok_or(CanvasError::UnknownCanvas(canvas))?;

        let mut order: Vec<PaintId> = target
            .paint_tasks()
            .filter(|paint| paints.contains_key(*paint))
            .collect();
        order.sort_by(|a, b| paints[*a].z_index().total_cmp(&paints[*b].z_index()));

        let mut ctx = PaintContext::new(backend, canvas);
        let mut is_valid = true;
        let mut stats = FrameStats {
            frames_drawn: target.stats().frames_drawn + 1,
            last_frame_time: time,
            ..FrameStats::default()
        };
        let mut settled_geometries: Vec<(PaintId, DrawableId)> = Vec::new();
        let mut settled_paints: Vec<PaintId> = Vec::new();
        let mut failure: Option<PaintError> = None;

        for paint_id in order {
            let Some(paint) = paints.get_mut(paint_id) else {
                continue;
            };
            let animatable = paint.animatable_mut();
            animatable.set_valid(true);
            animatable.set_current_time(time);
            if !config.animations_enabled {
                animatable.complete_transition(None);
            }

            let geometries: Vec<DrawableId> = paint.geometries(canvas).collect();
            let is_paused = paint.is_paused();
            {
                let mut pass = match paint.begin_pass(&mut ctx) {
                    Ok(pass) => pass,
                    Err(err) => {
                        tracing::warn!("MotionStage: {:?} failed to begin: {}", paint_id, err);
                        if failure.is_none() {
                            failure = Some(err);
                        }
                        continue;
                    }
                };
                for drawable_id in geometries {
                    let Some(drawable) = drawables.get_mut(drawable_id) else {
                        tracing::warn!(
                            "MotionStage: {:?} references missing drawable {:?}",
                            paint_id,
                            drawable_id
                        );
                        continue;
                    };
                    let animatable = drawable.animatable_mut();
                    animatable.set_valid(true);
                    animatable.set_current_time(time);
                    if !config.animations_enabled {
                        animatable.complete_transition(None);
                    }

                    if !is_paused {
                        match pass.draw(drawable.as_mut()) {
                            Ok(()) => stats.geometries_drawn += 1,
                            Err(err) => {
                                tracing::warn!(
                                    "MotionStage: {:?} failed to draw {:?}: {}",
                                    paint_id,
                                    drawable_id,
                                    err
                                );
                                if failure.is_none() {
                                    failure = Some(err);
                                }
                            }
                        }
                    }

                    let animatable = drawable.animatable();
                    is_valid &= animatable.is_valid();
                    if animatable.is_valid() && animatable.remove_on_completed() {
                        settled_geometries.push((paint_id, drawable_id));
                    }
                }
            }
            stats.paints_drawn += 1;

            let animatable = paint.animatable();
            is_valid &= animatable.is_valid();
            if animatable.is_valid() && animatable.remove_on_completed() {
                settled_paints.push(paint_id);
            }
        }
        drop(ctx);

        for (paint_id, drawable_id) in settled_geometries {
            if let Some(paint) = paints.get_mut(paint_id) {
                paint.remove_geometry(canvas, drawable_id);
            }
            is_valid = false;
        }
        for paint_id in settled_paints {
            target.remove_task(paint_id);
            if let Some(paint) = paints.get_mut(paint_id) {
                paint.release_canvas(canvas);
            }
            tracing::debug!("MotionStage: {:?} completed, removed from {:?}", paint_id, canvas);
            is_valid = false;
        }

        if failure.is_some() {
            is_valid = false;
        }
        stats.last_frame_duration = started.elapsed();
        target.finish_frame(is_valid, stats);
        tracing::trace!(
            "MotionStage: frame {} of {:?} at {}ms ({} paints, {} geometries, valid={})",
            stats.frames_drawn,
            canvas,
            time,
            stats.paints_drawn,
            stats.geometries_drawn,
            is_valid
        );
        match failure {
            Some(err) => Err(err.into()),
            None => Ok(stats),
        }
    }
}

impl Default for MotionStage {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl std::fmt::Debug for MotionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionStage")
            .field("config", &self.config)
            .field("canvases", &self.canvases.len())
            .field("paints", &self.paints.len())
            .field("drawables", &self.drawables.len())
            .finish()
    }
}
