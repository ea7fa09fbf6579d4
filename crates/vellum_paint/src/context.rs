//! Paint context - the drawing context geometries render through
//!
//! `PaintContext` wraps the backend `DrawContext` for one canvas and carries
//! the *active paint*: the native paint published by the paint task whose
//! pass is running. Geometries never pick a brush themselves; they describe
//! a shape and the active paint decides whether it is filled or stroked and
//! with what.

use vellum_core::{CanvasId, DrawContext, Point, Rect, Size};

use crate::error::{PaintError, Result};
use crate::native::NativePaint;

/// Drawing context for one canvas during one frame
pub struct PaintContext<'a> {
    backend: &'a mut dyn DrawContext,
    canvas: CanvasId,
    active: Option<NativePaint>,
}

impl<'a> PaintContext<'a> {
    pub fn new(backend: &'a mut dyn DrawContext, canvas: CanvasId) -> Self {
        Self {
            backend,
            canvas,
            active: None,
        }
    }

    /// Canvas whose geometry sets and clip rectangles apply
    pub fn canvas(&self) -> CanvasId {
        self.canvas
    }

    /// Direct access to the backend surface
    pub fn backend(&mut self) -> &mut dyn DrawContext {
        &mut *self.backend
    }

    pub fn viewport_size(&self) -> Size {
        self.backend.viewport_size()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Active paint
    // ═══════════════════════════════════════════════════════════════════════

    pub fn active_paint(&self) -> Option<&NativePaint> {
        self.active.as_ref()
    }

    pub fn active_paint_mut(&mut self) -> Option<&mut NativePaint> {
        self.active.as_mut()
    }

    pub(crate) fn publish(&mut self, native: NativePaint) {
        self.active = Some(native);
    }

    pub(crate) fn clear_active(&mut self) {
        self.active = None;
    }

    fn require_active(&self) -> Result<&NativePaint> {
        self.active.as_ref().ok_or(PaintError::NotInitialized)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Geometry drawing with the active paint
    // ═══════════════════════════════════════════════════════════════════════

    pub fn draw_rect(&mut self, rect: Rect) -> Result<()> {
        let native = self.require_active()?;
        let brush = native.brush();
        if native.is_stroke() {
            let stroke = native.stroke.clone();
            self.backend.stroke_rect(rect, &stroke, brush);
        } else {
            self.backend.fill_rect(rect, brush);
        }
        Ok(())
    }

    pub fn draw_circle(&mut self, center: Point, radius: f32) -> Result<()> {
        let native = self.require_active()?;
        let brush = native.brush();
        if native.is_stroke() {
            let stroke = native.stroke.clone();
            self.backend.stroke_circle(center, radius, &stroke, brush);
        } else {
            self.backend.fill_circle(center, radius, brush);
        }
        Ok(())
    }

    /// Lines are always stroked, whatever the paint style
    pub fn draw_line(&mut self, from: Point, to: Point) -> Result<()> {
        let native = self.require_active()?;
        let brush = native.brush();
        let stroke = native.stroke.clone();
        self.backend.stroke_line(from, to, &stroke, brush);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::PaintStyle;
    use slotmap::SlotMap;
    use vellum_core::{Brush, Color, DrawCommand, RecordingContext, Stroke};

    fn native(style: PaintStyle) -> NativePaint {
        NativePaint {
            style,
            color: Color::GREEN,
            shader: None,
            stroke: Stroke::new(3.0),
            antialias: true,
            effects: Vec::new(),
        }
    }

    #[test]
    fn test_draw_without_active_paint_fails() {
        let mut canvases: SlotMap<CanvasId, ()> = SlotMap::with_key();
        let canvas = canvases.insert(());
        let mut backend = RecordingContext::new(Size::new(100.0, 100.0));
        let mut ctx = PaintContext::new(&mut backend, canvas);

        assert_eq!(
            ctx.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0)),
            Err(PaintError::NotInitialized)
        );
        drop(ctx);
        assert!(backend.commands().is_empty());
    }

    #[test]
    fn test_style_selects_fill_or_stroke() {
        let mut canvases: SlotMap<CanvasId, ()> = SlotMap::with_key();
        let canvas = canvases.insert(());
        let mut backend = RecordingContext::new(Size::new(100.0, 100.0));
        let mut ctx = PaintContext::new(&mut backend, canvas);

        ctx.publish(native(PaintStyle::Fill));
        ctx.draw_circle(Point::new(5.0, 5.0), 2.0).unwrap();
        ctx.publish(native(PaintStyle::Stroke));
        ctx.draw_circle(Point::new(5.0, 5.0), 2.0).unwrap();
        ctx.draw_line(Point::ZERO, Point::new(1.0, 1.0)).unwrap();
        drop(ctx);

        let commands = backend.commands();
        assert!(matches!(
            commands[0],
            DrawCommand::FillCircle {
                brush: Brush::Solid(Color::GREEN),
                ..
            }
        ));
        assert!(matches!(commands[1], DrawCommand::StrokeCircle { .. }));
        assert!(matches!(
            commands[2],
            DrawCommand::StrokeLine { to, .. } if to == Point::new(1.0, 1.0)
        ));
    }
}
