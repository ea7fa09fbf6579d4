//! Drawables and the paint pass guard

use vellum_animation::Animatable;
use vellum_core::Size;

use crate::context::PaintContext;
use crate::error::Result;
use crate::paint::Paint;

/// Anything a paint can render
///
/// Drawables describe a shape through the `PaintContext`; the active paint
/// decides how it is filled or stroked. Each drawable owns the animatable
/// registry its interpolated properties live in.
pub trait Drawable: Send {
    /// Render with the context's active paint
    fn draw(&mut self, ctx: &mut PaintContext<'_>) -> Result<()>;

    /// Size the drawable occupies at its current interpolated state
    fn measure(&mut self) -> Size;

    /// Opacity applied through the paint's opacity mask
    fn opacity(&mut self) -> f32 {
        1.0
    }

    fn animatable(&self) -> &Animatable;

    fn animatable_mut(&mut self) -> &mut Animatable;
}

/// One paint pass over a drawing context
///
/// Created by `Paint::begin_pass`, which initializes the paint. Dropping the
/// guard disposes it, so pushed clip and filter state is popped even when a
/// drawable fails mid-pass.
pub struct PaintPass<'p, 'c, 'a> {
    paint: &'p mut Paint,
    ctx: &'c mut PaintContext<'a>,
}

impl Paint {
    /// Initialize the paint and return a guard that disposes it on drop
    pub fn begin_pass<'p, 'c, 'a>(
        &'p mut self,
        ctx: &'c mut PaintContext<'a>,
    ) -> Result<PaintPass<'p, 'c, 'a>> {
        if let Err(err) = self.initialize_task(ctx) {
            self.dispose(ctx);
            return Err(err);
        }
        Ok(PaintPass { paint: self, ctx })
    }
}

impl<'p, 'c, 'a> PaintPass<'p, 'c, 'a> {
    pub fn paint(&self) -> &Paint {
        &*self.paint
    }

    pub fn context(&mut self) -> &mut PaintContext<'a> {
        self.ctx
    }

    /// Draw one drawable, masking the paint with its opacity
    ///
    /// The mask is restored even when the drawable fails.
    pub fn draw(&mut self, drawable: &mut dyn Drawable) -> Result<()> {
        let opacity = drawable.opacity().clamp(0.0, 1.0);
        if opacity >= 1.0 {
            return drawable.draw(self.ctx);
        }

        self.paint.apply_opacity_mask(self.ctx, opacity)?;
        let drawn = drawable.draw(self.ctx);
        self.paint.restore_opacity_mask(self.ctx, opacity)?;
        drawn
    }
}

impl Drop for PaintPass<'_, '_, '_> {
    fn drop(&mut self) {
        self.paint.dispose(self.ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaintError;
    use crate::gradient::LinearGradient;
    use slotmap::SlotMap;
    use vellum_core::{
        Brush, CanvasId, Color, DrawCommand, DrawContext, Rect, RecordingContext,
    };

    struct Square {
        rect: Rect,
        opacity: f32,
        fail: bool,
        animatable: Animatable,
    }

    impl Square {
        fn new(opacity: f32) -> Self {
            Self {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                opacity,
                fail: false,
                animatable: Animatable::new(),
            }
        }
    }

    impl Drawable for Square {
        fn draw(&mut self, ctx: &mut PaintContext<'_>) -> Result<()> {
            if self.fail {
                return Err(PaintError::NotInitialized);
            }
            ctx.draw_rect(self.rect)
        }

        fn measure(&mut self) -> Size {
            self.rect.size()
        }

        fn opacity(&mut self) -> f32 {
            self.opacity
        }

        fn animatable(&self) -> &Animatable {
            &self.animatable
        }

        fn animatable_mut(&mut self) -> &mut Animatable {
            &mut self.animatable
        }
    }

    fn canvas() -> CanvasId {
        let mut canvases: SlotMap<CanvasId, ()> = SlotMap::with_key();
        canvases.insert(())
    }

    #[test]
    fn test_pass_masks_each_drawable() {
        let canvas = canvas();
        let mut backend = RecordingContext::new(Size::new(100.0, 100.0));
        let mut paint = Paint::solid(Color::RED);
        {
            let mut ctx = PaintContext::new(&mut backend, canvas);
            let mut pass = paint.begin_pass(&mut ctx).unwrap();
            pass.draw(&mut Square::new(0.5)).unwrap();
            pass.draw(&mut Square::new(1.0)).unwrap();
            assert_eq!(
                pass.context().active_paint().map(|n| n.color),
                Some(Color::RED)
            );
        }

        let alphas: Vec<u8> = backend
            .brushes()
            .map(|brush| match brush {
                Brush::Solid(color) => color.a,
                other => panic!("expected solid brush, got {:?}", other),
            })
            .collect();
        assert_eq!(alphas, vec![127, 255]);
        assert!(paint.is_disposed());
    }

    #[test]
    fn test_drop_restores_clip_after_failure() {
        let canvas = canvas();
        let mut backend = RecordingContext::new(Size::new(100.0, 100.0));
        let mut paint =
            Paint::linear_gradient(LinearGradient::horizontal(&[Color::RED, Color::BLUE]));
        paint.set_clip_rectangle(canvas, Some(Rect::new(0.0, 0.0, 50.0, 50.0)));

        {
            let mut ctx = PaintContext::new(&mut backend, canvas);
            let mut pass = paint.begin_pass(&mut ctx).unwrap();
            let mut broken = Square::new(0.5);
            broken.fail = true;
            assert!(pass.draw(&mut broken).is_err());
            // Mask was restored despite the failure
            assert_eq!(
                pass.context().active_paint().map(|n| n.color),
                Some(Color::WHITE)
            );
        }

        assert_eq!(backend.clip_depth(), 0);
        assert!(matches!(
            backend.commands().last(),
            Some(DrawCommand::PopClip)
        ));
    }

    #[test]
    fn test_measure() {
        assert_eq!(Square::new(1.0).measure(), Size::new(10.0, 10.0));
    }
}
