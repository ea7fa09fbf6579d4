//! Bar Transition Demo
//!
//! Animates a small bar chart on a recording backend:
//! - five bars filled with a gradient and outlined with a solid stroke
//! - the bars grow to new heights, the last one fades out and is dropped
//! - a `FrameLoop` redraws the canvas while anything is still moving
//!
//! Run with: cargo run -p vellum_canvas --example transition_demo [motion.toml]

use anyhow::{anyhow, Context, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use vellum_canvas::geometry::{BOUNDS, OPACITY};
use vellum_canvas::{FrameLoop, MotionConfig, MotionStage, RectangleGeometry};
use vellum_core::{Color, Point, Rect, RecordingContext, Size};
use vellum_paint::{LinearGradient, Paint};

const VIEWPORT: Size = Size::new(640.0, 480.0);
const BAR_WIDTH: f32 = 60.0;

fn lock(stage: &Mutex<MotionStage>) -> Result<MutexGuard<'_, MotionStage>> {
    stage.lock().map_err(|_| anyhow!("motion stage lock poisoned"))
}

fn bar(index: usize, height: f32) -> Rect {
    Rect::new(
        40.0 + index as f32 * (BAR_WIDTH + 20.0),
        VIEWPORT.height - height,
        BAR_WIDTH,
        height,
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => MotionConfig::load(&path)
            .with_context(|| format!("Failed to load motion config {}", path))?,
        None => MotionConfig::default(),
    };

    let mut stage = MotionStage::new(config.clone());
    let canvas = stage.create_canvas();

    let fill = stage.add_paint(Paint::linear_gradient(LinearGradient::new(
        &[Color::CYAN, Color::BLUE],
        Point::new(0.5, 0.0),
        Point::new(0.5, 1.0),
    )));
    let outline = stage.add_paint(Paint::solid(Color::BLACK).stroked(1.5).with_z_index(1.0));

    let heights = [120.0, 200.0, 80.0, 260.0, 160.0];
    let mut bars = Vec::with_capacity(heights.len());
    for (index, height) in heights.iter().enumerate() {
        let id = stage.add_drawable(RectangleGeometry::new(bar(index, *height)));
        stage.add_geometry_to_paint_task(canvas, fill, id)?;
        stage.add_geometry_to_paint_task(canvas, outline, id)?;
        bars.push(id);
    }

    let dirty = stage.canvas(canvas)?.dirty_flag();
    let stage = Arc::new(Mutex::new(stage));

    let frame_loop = FrameLoop::start(dirty, config.poll_interval(), {
        let stage = Arc::clone(&stage);
        move || {
            let Ok(mut stage) = stage.lock() else {
                return;
            };
            let mut backend = RecordingContext::new(VIEWPORT);
            match stage.draw_frame(canvas, &mut backend) {
                Ok(stats) => tracing::info!(
                    "frame {} at {}ms: {} geometries, {} commands",
                    stats.frames_drawn,
                    stats.last_frame_time,
                    stats.geometries_drawn,
                    backend.commands().len()
                ),
                Err(err) => tracing::error!("draw_frame failed: {}", err),
            }
        }
    });

    thread::sleep(Duration::from_millis(100));

    {
        let mut stage = lock(&stage)?;
        for (index, id) in bars.iter().enumerate() {
            let height = 60.0 + ((index * 97) % 5) as f32 * 50.0;
            stage
                .drawable_mut(*id)?
                .animatable_mut()
                .set(BOUNDS, bar(index, height))?;
        }

        if let Some(last) = bars.last() {
            let animatable = stage.drawable_mut(*last)?.animatable_mut();
            animatable.set(OPACITY, 0.0)?;
            animatable.set_remove_on_completed(true);
        }
    }

    thread::sleep(config.default_animation.duration() + Duration::from_millis(300));
    drop(frame_loop);

    let stage = lock(&stage)?;
    let stats = stage.canvas(canvas)?.stats();
    tracing::info!(
        "done: {} frames, {} geometries left, canvas valid = {}",
        stats.frames_drawn,
        stage.count_geometries(canvas)?,
        stage.is_valid(canvas)?
    );

    Ok(())
}
