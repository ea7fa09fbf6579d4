//! Paint tasks
//!
//! `Paint` is a tagged variant over the supported drawing styles. The parts
//! every variant shares (stroke attributes, filters, flags, the animatable
//! registry and per-canvas geometry sets) live on the struct; the part that
//! differs lives in `PaintKind` and is dispatched by `match`.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use slotmap::SparseSecondaryMap;
use vellum_animation::{Animatable, Interpolate, PropertyKey};
use vellum_core::{CanvasId, Color, DrawableId, LineCap, LineJoin, Rect, Stroke};

use crate::context::PaintContext;
use crate::effects::{transitionate_option, ImageFilter, PathEffect};
use crate::error::{PaintError, Result};
use crate::gradient::{LinearGradient, RadialGradient};
use crate::native::NativePaint;

/// Animated stroke width
pub const STROKE_THICKNESS: PropertyKey<f32> = PropertyKey::new("stroke_thickness");
/// Animated miter limit
pub const STROKE_MITER: PropertyKey<f32> = PropertyKey::new("stroke_miter");
/// Animated color of solid paints
pub const COLOR: PropertyKey<Color> = PropertyKey::new("color");

/// Whether geometries are filled or outlined
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

/// Variant-specific part of a paint
#[derive(Clone, Debug, PartialEq)]
pub enum PaintKind {
    /// Solid color; the color itself is the animated `COLOR` property
    Solid,
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
}

impl PaintKind {
    fn same_kind(&self, other: &PaintKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

type GeometrySet = IndexSet<DrawableId, FxBuildHasher>;

/// A paint's state on one canvas
#[derive(Clone, Debug, Default)]
struct CanvasTask {
    geometries: GeometrySet,
    clip: Option<Rect>,
}

/// Where a paint is in its per-frame pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum PassState {
    #[default]
    Uninitialized,
    Initialized {
        clip_pushed: bool,
        effects_pushed: usize,
    },
    Disposed,
}

/// A drawing style plus the geometries it paints on each canvas
pub struct Paint {
    kind: PaintKind,
    style: PaintStyle,
    is_antialias: bool,
    z_index: f32,
    stroke_cap: LineCap,
    stroke_join: LineJoin,
    path_effect: Option<PathEffect>,
    image_filter: Option<ImageFilter>,
    is_paused: bool,
    animatable: Animatable,
    tasks: SparseSecondaryMap<CanvasId, CanvasTask>,
    native: Option<NativePaint>,
    pass: PassState,
}

impl Paint {
    fn with_kind(kind: PaintKind, animatable: Animatable) -> Self {
        Self {
            kind,
            style: PaintStyle::Fill,
            is_antialias: true,
            z_index: 0.0,
            stroke_cap: LineCap::default(),
            stroke_join: LineJoin::default(),
            path_effect: None,
            image_filter: None,
            is_paused: false,
            animatable: animatable
                .with_property(STROKE_THICKNESS.name(), 1.0_f32)
                .with_property(STROKE_MITER.name(), 4.0_f32),
            tasks: SparseSecondaryMap::default(),
            native: None,
            pass: PassState::Uninitialized,
        }
    }

    /// Solid color paint
    pub fn solid(color: Color) -> Self {
        Self::with_kind(
            PaintKind::Solid,
            Animatable::new().with_property(COLOR.name(), color),
        )
    }

    pub fn linear_gradient(gradient: LinearGradient) -> Self {
        Self::with_kind(PaintKind::LinearGradient(gradient), Animatable::new())
    }

    pub fn radial_gradient(gradient: RadialGradient) -> Self {
        Self::with_kind(PaintKind::RadialGradient(gradient), Animatable::new())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Builder API
    // ═══════════════════════════════════════════════════════════════════════

    pub fn stroked(mut self, thickness: f32) -> Self {
        self.style = PaintStyle::Stroke;
        if let Err(err) = self.set_stroke_thickness(thickness) {
            tracing::warn!("Paint::stroked: {}", err);
        }
        self.animatable.complete_transition(Some(&[STROKE_THICKNESS.name()]));
        self
    }

    pub fn with_z_index(mut self, z_index: f32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_path_effect(mut self, effect: PathEffect) -> Self {
        self.path_effect = Some(effect);
        self
    }

    pub fn with_image_filter(mut self, filter: ImageFilter) -> Self {
        self.image_filter = Some(filter);
        self
    }

    pub fn with_stroke_cap(mut self, cap: LineCap) -> Self {
        self.stroke_cap = cap;
        self
    }

    pub fn with_stroke_join(mut self, join: LineJoin) -> Self {
        self.stroke_join = join;
        self
    }

    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.is_antialias = antialias;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Style accessors
    // ═══════════════════════════════════════════════════════════════════════

    pub fn kind(&self) -> &PaintKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut PaintKind {
        self.animatable.invalidate();
        &mut self.kind
    }

    pub fn style(&self) -> PaintStyle {
        self.style
    }

    pub fn set_style(&mut self, style: PaintStyle) {
        self.style = style;
        self.animatable.invalidate();
    }

    pub fn is_antialias(&self) -> bool {
        self.is_antialias
    }

    pub fn set_antialias(&mut self, antialias: bool) {
        self.is_antialias = antialias;
        self.animatable.invalidate();
    }

    pub fn z_index(&self) -> f32 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: f32) {
        self.z_index = z_index;
        self.animatable.invalidate();
    }

    pub fn stroke_cap(&self) -> LineCap {
        self.stroke_cap
    }

    pub fn stroke_join(&self) -> LineJoin {
        self.stroke_join
    }

    pub fn path_effect(&self) -> Option<&PathEffect> {
        self.path_effect.as_ref()
    }

    pub fn set_path_effect(&mut self, effect: Option<PathEffect>) {
        self.path_effect = effect;
        self.animatable.invalidate();
    }

    pub fn image_filter(&self) -> Option<&ImageFilter> {
        self.image_filter.as_ref()
    }

    pub fn set_image_filter(&mut self, filter: Option<ImageFilter>) {
        self.image_filter = filter;
        self.animatable.invalidate();
    }

    /// Current (interpolated) stroke width
    pub fn stroke_thickness(&mut self) -> Result<f32> {
        Ok(self.animatable.get(STROKE_THICKNESS)?)
    }

    pub fn set_stroke_thickness(&mut self, thickness: f32) -> Result<()> {
        Ok(self.animatable.set(STROKE_THICKNESS, thickness)?)
    }

    pub fn stroke_miter(&mut self) -> Result<f32> {
        Ok(self.animatable.get(STROKE_MITER)?)
    }

    pub fn set_stroke_miter(&mut self, miter: f32) -> Result<()> {
        Ok(self.animatable.set(STROKE_MITER, miter)?)
    }

    /// Current (interpolated) color of a solid paint
    pub fn color(&mut self) -> Result<Color> {
        match self.kind {
            PaintKind::Solid => Ok(self.animatable.get(COLOR)?),
            _ => Err(PaintError::NotSolid),
        }
    }

    pub fn set_color(&mut self, color: Color) -> Result<()> {
        match self.kind {
            PaintKind::Solid => Ok(self.animatable.set(COLOR, color)?),
            _ => Err(PaintError::NotSolid),
        }
    }

    /// Paused paints keep their geometries but skip drawing them
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        self.animatable.invalidate();
    }

    pub fn animatable(&self) -> &Animatable {
        &self.animatable
    }

    pub fn animatable_mut(&mut self) -> &mut Animatable {
        &mut self.animatable
    }

    /// Last native paint built by `initialize_task`, if the pass is running
    pub fn native(&self) -> Option<&NativePaint> {
        self.native.as_ref()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Per-canvas geometry sets
    // ═══════════════════════════════════════════════════════════════════════

    fn task_mut(&mut self, canvas: CanvasId) -> Option<&mut CanvasTask> {
        let task = self.tasks.entry(canvas).map(|entry| entry.or_default());
        if task.is_none() {
            tracing::warn!("Paint: ignoring stale canvas handle {:?}", canvas);
        }
        task
    }

    /// Geometries registered on `canvas`, in registration order
    ///
    /// Empty for canvases the paint was never attached to.
    pub fn geometries(&self, canvas: CanvasId) -> impl Iterator<Item = DrawableId> + '_ {
        self.tasks
            .get(canvas)
            .into_iter()
            .flat_map(|task| task.geometries.iter().copied())
    }

    pub fn geometry_count(&self, canvas: CanvasId) -> usize {
        self.tasks
            .get(canvas)
            .map_or(0, |task| task.geometries.len())
    }

    pub fn contains_geometry(&self, canvas: CanvasId, drawable: DrawableId) -> bool {
        self.tasks
            .get(canvas)
            .is_some_and(|task| task.geometries.contains(&drawable))
    }

    /// Returns false if the geometry was already registered
    pub fn add_geometry(&mut self, canvas: CanvasId, drawable: DrawableId) -> bool {
        self.animatable.invalidate();
        self.task_mut(canvas)
            .is_some_and(|task| task.geometries.insert(drawable))
    }

    /// Returns false if the geometry was not registered
    pub fn remove_geometry(&mut self, canvas: CanvasId, drawable: DrawableId) -> bool {
        self.animatable.invalidate();
        self.tasks
            .get_mut(canvas)
            .is_some_and(|task| task.geometries.shift_remove(&drawable))
    }

    /// Replace the geometry set on `canvas`
    pub fn set_geometries(
        &mut self,
        canvas: CanvasId,
        drawables: impl IntoIterator<Item = DrawableId>,
    ) {
        self.animatable.invalidate();
        if let Some(task) = self.task_mut(canvas) {
            task.geometries = drawables.into_iter().collect();
        }
    }

    pub fn clear_geometries(&mut self, canvas: CanvasId) {
        self.animatable.invalidate();
        if let Some(task) = self.tasks.get_mut(canvas) {
            task.geometries.clear();
        }
    }

    pub fn clip_rectangle(&self, canvas: CanvasId) -> Option<Rect> {
        self.tasks.get(canvas).and_then(|task| task.clip)
    }

    /// Clip the paint's pass on `canvas`; `None` removes the clip
    pub fn set_clip_rectangle(&mut self, canvas: CanvasId, clip: Option<Rect>) {
        self.animatable.invalidate();
        if let Some(task) = self.task_mut(canvas) {
            task.clip = clip;
        }
    }

    /// Drop every association with a canvas being torn down
    pub fn release_canvas(&mut self, canvas: CanvasId) {
        if self.tasks.remove(canvas).is_some() {
            tracing::debug!("Paint: released canvas {:?}", canvas);
        }
    }

    /// Canvases this paint holds geometry sets or clips for
    pub fn canvases(&self) -> impl Iterator<Item = CanvasId> + '_ {
        self.tasks.keys()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Cloning & transitions
    // ═══════════════════════════════════════════════════════════════════════

    /// Independent copy of the style, without canvas associations
    pub fn clone_task(&self) -> Paint {
        Paint {
            kind: self.kind.clone(),
            style: self.style,
            is_antialias: self.is_antialias,
            z_index: self.z_index,
            stroke_cap: self.stroke_cap,
            stroke_join: self.stroke_join,
            path_effect: self.path_effect.clone(),
            image_filter: self.image_filter.clone(),
            is_paused: self.is_paused,
            animatable: self.animatable.clone(),
            tasks: SparseSecondaryMap::default(),
            native: None,
            pass: PassState::Uninitialized,
        }
    }

    /// Paint `progress` of the way from `self` to `target`
    ///
    /// Paints of a different kind do not blend: a copy of `target` is
    /// returned. Gradients must have the same number of stops.
    pub fn transitionate(&mut self, progress: f32, target: &mut Paint) -> Result<Paint> {
        if !self.kind.same_kind(&target.kind) {
            return Ok(target.clone_task());
        }

        let progress = progress.clamp(0.0, 1.0);
        let mut blended = self.clone_task();

        blended.kind = match (&self.kind, &target.kind) {
            (PaintKind::LinearGradient(a), PaintKind::LinearGradient(b)) => {
                PaintKind::LinearGradient(a.transitionate(progress, b)?)
            }
            (PaintKind::RadialGradient(a), PaintKind::RadialGradient(b)) => {
                PaintKind::RadialGradient(a.transitionate(progress, b)?)
            }
            (kind, _) => kind.clone(),
        };

        if self.kind == PaintKind::Solid {
            let color = self.color()?.lerp(&target.color()?, progress);
            blended.set_color(color)?;
        }

        let thickness = self
            .stroke_thickness()?
            .lerp(&target.stroke_thickness()?, progress);
        let miter = self.stroke_miter()?.lerp(&target.stroke_miter()?, progress);
        blended.set_stroke_thickness(thickness)?;
        blended.set_stroke_miter(miter)?;
        blended.animatable.complete_transition(None);

        blended.path_effect = transitionate_option(
            self.path_effect.as_ref(),
            target.path_effect.as_ref(),
            progress,
            |a, p, b| a.transitionate(p, b),
        );
        blended.image_filter = transitionate_option(
            self.image_filter.as_ref(),
            target.image_filter.as_ref(),
            progress,
            |a, p, b| a.transitionate(p, b),
        );

        if progress >= 1.0 {
            blended.style = target.style;
            blended.stroke_cap = target.stroke_cap;
            blended.stroke_join = target.stroke_join;
            blended.is_antialias = target.is_antialias;
        }

        Ok(blended)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Paint pass
    // ═══════════════════════════════════════════════════════════════════════

    /// Build the native paint and publish it as the active paint
    ///
    /// Pushes the canvas clip rectangle and image filters onto the backend;
    /// `dispose` pops them. Calling this again before `dispose` republishes
    /// the native paint without pushing anything twice.
    pub fn initialize_task(&mut self, ctx: &mut PaintContext<'_>) -> Result<()> {
        if let PassState::Initialized { .. } = self.pass {
            if let Some(native) = &self.native {
                ctx.publish(native.clone());
            }
            return Ok(());
        }

        let canvas = ctx.canvas();
        let clip = self.clip_rectangle(canvas);
        let bounds = clip.unwrap_or_else(|| ctx.viewport_size().to_rect());
        let native = self.build_native(bounds)?;

        let backend = ctx.backend();
        if let Some(clip) = clip {
            backend.push_clip(clip);
        }
        for effect in &native.effects {
            backend.push_effect(effect.clone());
        }
        backend.set_antialias(native.antialias);

        self.pass = PassState::Initialized {
            clip_pushed: clip.is_some(),
            effects_pushed: native.effects.len(),
        };
        ctx.publish(native.clone());
        self.native = Some(native);
        Ok(())
    }

    fn build_native(&mut self, bounds: Rect) -> Result<NativePaint> {
        let (color, shader) = match &self.kind {
            PaintKind::Solid => (self.animatable.get(COLOR)?, None),
            PaintKind::LinearGradient(gradient) => (Color::WHITE, Some(gradient.resolve(bounds))),
            PaintKind::RadialGradient(gradient) => (Color::WHITE, Some(gradient.resolve(bounds))),
        };

        let mut stroke = Stroke::new(self.animatable.get(STROKE_THICKNESS)?)
            .with_miter_limit(self.animatable.get(STROKE_MITER)?)
            .with_cap(self.stroke_cap)
            .with_join(self.stroke_join);
        if let Some(effect) = &self.path_effect {
            effect.apply_to(&mut stroke);
        }

        Ok(NativePaint {
            style: self.style,
            color,
            shader,
            stroke,
            antialias: self.is_antialias,
            effects: self
                .image_filter
                .as_ref()
                .map(ImageFilter::layer_effects)
                .unwrap_or_default(),
        })
    }

    /// Fade the active paint to `opacity` for the next geometry
    ///
    /// Must be followed by `restore_opacity_mask` once the geometry is drawn.
    pub fn apply_opacity_mask(&self, ctx: &mut PaintContext<'_>, opacity: f32) -> Result<()> {
        let base = self.native.as_ref().ok_or(PaintError::NotInitialized)?.color;
        let active = ctx.active_paint_mut().ok_or(PaintError::NotInitialized)?;
        active.color = base.scale_alpha(opacity);
        Ok(())
    }

    /// Put the active paint's color back to the paint's base color
    pub fn restore_opacity_mask(&self, ctx: &mut PaintContext<'_>, _opacity: f32) -> Result<()> {
        let base = self.native.as_ref().ok_or(PaintError::NotInitialized)?.color;
        let active = ctx.active_paint_mut().ok_or(PaintError::NotInitialized)?;
        active.color = base;
        Ok(())
    }

    /// End the pass: pop pushed state and release the native paint
    ///
    /// Safe to call any number of times; only the first call after an
    /// `initialize_task` touches the backend.
    pub fn dispose(&mut self, ctx: &mut PaintContext<'_>) {
        if let PassState::Initialized {
            clip_pushed,
            effects_pushed,
        } = self.pass
        {
            let backend = ctx.backend();
            for _ in 0..effects_pushed {
                backend.pop_effect();
            }
            if clip_pushed {
                backend.pop_clip();
            }
            ctx.clear_active();
            self.pass = PassState::Disposed;
        }
        self.native = None;
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.pass, PassState::Initialized { .. })
    }

    pub fn is_disposed(&self) -> bool {
        self.pass == PassState::Disposed
    }
}

impl std::fmt::Debug for Paint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paint")
            .field("kind", &self.kind)
            .field("style", &self.style)
            .field("z_index", &self.z_index)
            .field("canvases", &self.tasks.len())
            .field("pass", &self.pass)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::time::Duration;
    use vellum_animation::{Animation, Easing};
    use vellum_core::{Brush, DrawCommand, DrawContext, Point, RecordingContext, Size};

    fn handles() -> (CanvasId, CanvasId, Vec<DrawableId>) {
        let mut canvases: SlotMap<CanvasId, ()> = SlotMap::with_key();
        let mut drawables: SlotMap<DrawableId, ()> = SlotMap::with_key();
        let a = canvases.insert(());
        let b = canvases.insert(());
        let ids = (0..3).map(|_| drawables.insert(())).collect();
        (a, b, ids)
    }

    #[test]
    fn test_stroked_applies_thickness_immediately() {
        let mut paint = Paint::solid(Color::RED);
        paint.animatable_mut().set_transition(
            Some(Animation::new(Easing::Linear, Duration::from_millis(100))),
            None,
        );

        let mut paint = paint.stroked(4.0);
        assert_eq!(paint.style(), PaintStyle::Stroke);
        assert_eq!(paint.stroke_thickness().unwrap(), 4.0);
        assert!(paint.animatable().is_completed());
    }

    #[test]
    fn test_geometries_keyed_by_canvas() {
        let (canvas_a, canvas_b, ids) = handles();
        let mut paint = Paint::solid(Color::RED);

        assert!(paint.add_geometry(canvas_a, ids[0]));
        assert!(paint.add_geometry(canvas_a, ids[1]));
        assert!(!paint.add_geometry(canvas_a, ids[1]));

        assert_eq!(paint.geometries(canvas_b).count(), 0);
        assert_eq!(
            paint.geometries(canvas_a).collect::<Vec<_>>(),
            vec![ids[0], ids[1]]
        );
        // Restartable
        assert_eq!(paint.geometries(canvas_a).count(), 2);
        assert_eq!(paint.geometries(canvas_b).count(), 0);
    }

    #[test]
    fn test_mutations_invalidate() {
        let (canvas, _, ids) = handles();
        let mut paint = Paint::solid(Color::RED);

        paint.animatable_mut().set_valid(true);
        paint.add_geometry(canvas, ids[0]);
        assert!(!paint.animatable().is_valid());

        paint.animatable_mut().set_valid(true);
        paint.remove_geometry(canvas, ids[0]);
        assert!(!paint.animatable().is_valid());
        assert_eq!(paint.geometry_count(canvas), 0);

        paint.animatable_mut().set_valid(true);
        paint.set_geometries(canvas, ids.clone());
        assert!(!paint.animatable().is_valid());
        assert_eq!(paint.geometry_count(canvas), 3);

        paint.animatable_mut().set_valid(true);
        paint.clear_geometries(canvas);
        assert!(!paint.animatable().is_valid());
        assert_eq!(paint.geometry_count(canvas), 0);
    }

    #[test]
    fn test_release_canvas() {
        let (canvas_a, canvas_b, ids) = handles();
        let mut paint = Paint::solid(Color::RED);
        paint.add_geometry(canvas_a, ids[0]);
        paint.add_geometry(canvas_b, ids[1]);
        paint.set_clip_rectangle(canvas_a, Some(Rect::new(0.0, 0.0, 1.0, 1.0)));

        paint.release_canvas(canvas_a);
        assert_eq!(paint.geometry_count(canvas_a), 0);
        assert_eq!(paint.clip_rectangle(canvas_a), None);
        assert_eq!(paint.geometry_count(canvas_b), 1);
        assert_eq!(paint.canvases().collect::<Vec<_>>(), vec![canvas_b]);
    }

    #[test]
    fn test_clone_independence() {
        let (canvas, _, ids) = handles();
        let mut original = Paint::solid(Color::RED).stroked(2.0);
        original.add_geometry(canvas, ids[0]);

        let mut clone = original.clone_task();
        assert_eq!(clone.geometry_count(canvas), 0);

        clone.set_color(Color::BLUE).unwrap();
        clone.set_stroke_thickness(8.0).unwrap();
        clone.set_path_effect(Some(PathEffect::dash(&[1.0, 1.0], 0.0)));

        assert_eq!(original.color().unwrap(), Color::RED);
        assert_eq!(original.stroke_thickness().unwrap(), 2.0);
        assert!(original.path_effect().is_none());

        original.set_color(Color::GREEN).unwrap();
        assert_eq!(clone.color().unwrap(), Color::BLUE);
    }

    #[test]
    fn test_solid_transition_midpoint() {
        let mut red = Paint::solid(Color::rgba(255, 0, 0, 255));
        let mut blue = Paint::solid(Color::rgba(0, 0, 255, 255));

        let mut mid = red.transitionate(0.5, &mut blue).unwrap();
        let color = mid.color().unwrap();
        assert!((color.r as i32 - 128).abs() <= 1);
        assert_eq!(color.g, 0);
        assert!((color.b as i32 - 128).abs() <= 1);
        assert_eq!(color.a, 255);
    }

    #[test]
    fn test_transition_endpoints() {
        let mut source = Paint::solid(Color::RED).stroked(1.0);
        let mut target = Paint::solid(Color::BLUE)
            .stroked(5.0)
            .with_image_filter(ImageFilter::blur(3.0, 3.0));

        let mut start = source.transitionate(0.0, &mut target).unwrap();
        assert_eq!(start.color().unwrap(), Color::RED);
        assert_eq!(start.stroke_thickness().unwrap(), 1.0);
        assert!(start.image_filter().is_none());

        let mut end = source.transitionate(1.0, &mut target).unwrap();
        assert_eq!(end.color().unwrap(), Color::BLUE);
        assert_eq!(end.stroke_thickness().unwrap(), 5.0);
        assert_eq!(end.image_filter(), Some(&ImageFilter::blur(3.0, 3.0)));
    }

    #[test]
    fn test_transition_across_kinds_returns_target() {
        let mut solid = Paint::solid(Color::RED);
        let mut gradient =
            Paint::linear_gradient(LinearGradient::horizontal(&[Color::RED, Color::BLUE]));

        let result = solid.transitionate(0.5, &mut gradient).unwrap();
        assert_eq!(result.kind(), gradient.kind());
    }

    #[test]
    fn test_gradient_stop_mismatch() {
        let mut a = Paint::radial_gradient(RadialGradient::centered(&[Color::RED, Color::BLUE]));
        let mut b = Paint::radial_gradient(RadialGradient::centered(&[
            Color::RED,
            Color::GREEN,
            Color::BLUE,
        ]));
        assert!(matches!(
            a.transitionate(0.5, &mut b),
            Err(PaintError::GradientStopMismatch { .. })
        ));

        let mut c = Paint::linear_gradient(LinearGradient::horizontal(&[Color::RED]));
        let mut d = Paint::linear_gradient(LinearGradient::horizontal(&[Color::RED, Color::BLUE]));
        assert!(matches!(
            c.transitionate(0.5, &mut d),
            Err(PaintError::GradientStopMismatch { .. })
        ));
    }

    #[test]
    fn test_color_is_solid_only() {
        let mut gradient = Paint::linear_gradient(LinearGradient::horizontal(&[Color::RED]));
        assert_eq!(gradient.color(), Err(PaintError::NotSolid));
        assert_eq!(gradient.set_color(Color::RED), Err(PaintError::NotSolid));
    }

    #[test]
    fn test_clip_balance_and_idempotent_dispose() {
        let (canvas, _, _) = handles();
        let mut backend = RecordingContext::new(Size::new(200.0, 100.0));
        let mut paint = Paint::solid(Color::RED).with_image_filter(ImageFilter::blur(1.0, 1.0));
        paint.set_clip_rectangle(canvas, Some(Rect::new(10.0, 10.0, 50.0, 50.0)));

        let depth_before = backend.clip_depth();
        {
            let mut ctx = PaintContext::new(&mut backend, canvas);
            paint.initialize_task(&mut ctx).unwrap();
            // Re-initializing within the same pass does not push twice
            paint.initialize_task(&mut ctx).unwrap();
            assert_eq!(ctx.backend().clip_depth(), depth_before + 1);

            ctx.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0)).unwrap();

            paint.dispose(&mut ctx);
            paint.dispose(&mut ctx);
            assert!(ctx.active_paint().is_none());
        }

        assert_eq!(backend.clip_depth(), depth_before);
        assert_eq!(backend.effect_depth(), 0);
        let pops = backend
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::PopClip))
            .count();
        assert_eq!(pops, 1);
        assert!(paint.is_disposed());
        assert!(paint.native().is_none());
    }

    #[test]
    fn test_pass_is_reenterable() {
        let (canvas, _, _) = handles();
        let mut backend = RecordingContext::new(Size::new(200.0, 100.0));
        let mut paint = Paint::solid(Color::RED);
        let mut ctx = PaintContext::new(&mut backend, canvas);

        paint.initialize_task(&mut ctx).unwrap();
        paint.dispose(&mut ctx);

        paint.set_color(Color::BLUE).unwrap();
        paint.initialize_task(&mut ctx).unwrap();
        assert!(paint.is_initialized());
        assert_eq!(ctx.active_paint().map(|n| n.color), Some(Color::BLUE));
        paint.dispose(&mut ctx);
    }

    #[test]
    fn test_opacity_mask_round_trip() {
        let (canvas, _, _) = handles();
        let mut backend = RecordingContext::new(Size::new(200.0, 100.0));
        let mut paint = Paint::solid(Color::rgba(10, 20, 30, 200));
        let mut ctx = PaintContext::new(&mut backend, canvas);

        paint.initialize_task(&mut ctx).unwrap();
        let before = ctx.active_paint().unwrap().color;

        paint.apply_opacity_mask(&mut ctx, 0.5).unwrap();
        assert_eq!(ctx.active_paint().unwrap().color.a, 100);

        paint.restore_opacity_mask(&mut ctx, 0.5).unwrap();
        assert_eq!(ctx.active_paint().unwrap().color, before);
        paint.dispose(&mut ctx);
    }

    #[test]
    fn test_opacity_mask_requires_initialization() {
        let (canvas, _, _) = handles();
        let mut backend = RecordingContext::new(Size::new(200.0, 100.0));
        let paint = Paint::radial_gradient(RadialGradient::centered(&[Color::RED, Color::BLUE]));
        let mut ctx = PaintContext::new(&mut backend, canvas);

        assert_eq!(
            paint.apply_opacity_mask(&mut ctx, 0.5),
            Err(PaintError::NotInitialized)
        );
        assert_eq!(
            paint.restore_opacity_mask(&mut ctx, 0.5),
            Err(PaintError::NotInitialized)
        );
    }

    #[test]
    fn test_gradient_resolved_against_clip() {
        let (canvas, _, _) = handles();
        let mut backend = RecordingContext::new(Size::new(200.0, 100.0));
        let mut paint =
            Paint::linear_gradient(LinearGradient::horizontal(&[Color::RED, Color::BLUE]));
        paint.set_clip_rectangle(canvas, Some(Rect::new(50.0, 0.0, 100.0, 20.0)));

        let mut ctx = PaintContext::new(&mut backend, canvas);
        paint.initialize_task(&mut ctx).unwrap();
        ctx.draw_rect(Rect::new(50.0, 0.0, 100.0, 20.0)).unwrap();
        paint.dispose(&mut ctx);
        drop(ctx);

        match backend.brushes().next() {
            Some(Brush::Gradient(vellum_core::Gradient::Linear { start, end, .. })) => {
                assert_eq!(*start, Point::new(50.0, 10.0));
                assert_eq!(*end, Point::new(150.0, 10.0));
            }
            other => panic!("expected linear gradient brush, got {:?}", other),
        };
    }

    #[test]
    fn test_native_reflects_interpolated_properties() {
        let (canvas, _, _) = handles();
        let mut backend = RecordingContext::new(Size::new(200.0, 100.0));
        let mut paint = Paint::solid(Color::BLACK).stroked(0.0);
        paint.animatable_mut().set_transition(
            Some(Animation::new(Easing::Linear, Duration::from_millis(100))),
            None,
        );
        paint.set_stroke_thickness(10.0).unwrap();
        paint.stroke_thickness().unwrap();

        paint.animatable_mut().set_current_time(50);
        let mut ctx = PaintContext::new(&mut backend, canvas);
        paint.initialize_task(&mut ctx).unwrap();
        assert_eq!(ctx.active_paint().unwrap().stroke.width, 5.0);
        paint.dispose(&mut ctx);
    }
}
