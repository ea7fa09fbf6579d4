//! Invalidation loop
//!
//! A `FrameLoop` runs on its own thread and polls a canvas's dirty flag at a
//! fixed interval. Whenever the flag is set it is cleared and the frame
//! callback runs; the callback is expected to call `draw_frame`, which sets
//! the flag again while anything is still animating.
//!
//! ```ignore
//! let stage = Arc::new(Mutex::new(stage));
//! let dirty = stage.lock().unwrap().canvas(canvas)?.dirty_flag();
//! let frames = FrameLoop::start(dirty, config.poll_interval(), {
//!     let stage = Arc::clone(&stage);
//!     move || {
//!         let mut stage = stage.lock().unwrap();
//!         let _ = stage.draw_frame(canvas, &mut backend);
//!     }
//! });
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use vellum_core::DirtyFlag;

use crate::config::MAX_POLL_INTERVAL_MS;

/// Background thread drawing a canvas whenever it is dirty
pub struct FrameLoop {
    /// Stop signal for the polling thread
    stop_flag: Arc<AtomicBool>,
    /// Number of times the frame callback ran
    frames: Arc<AtomicU64>,
    thread_handle: Option<JoinHandle<()>>,
}

impl FrameLoop {
    /// Start polling `dirty` every `interval`
    ///
    /// The interval is clamped to 1ms..=1s.
    pub fn start<F>(dirty: DirtyFlag, interval: Duration, mut on_frame: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let interval = interval.clamp(
            Duration::from_millis(1),
            Duration::from_millis(MAX_POLL_INTERVAL_MS),
        );
        let stop_flag = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(AtomicU64::new(0));

        let thread_stop = Arc::clone(&stop_flag);
        let thread_frames = Arc::clone(&frames);
        let thread_handle = thread::spawn(move || {
            tracing::debug!("FrameLoop: started ({:?} interval)", interval);
            while !thread_stop.load(Ordering::Relaxed) {
                let start = Instant::now();

                if dirty.swap(false, Ordering::AcqRel) {
                    on_frame();
                    thread_frames.fetch_add(1, Ordering::Relaxed);
                }

                let elapsed = start.elapsed();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
            tracing::debug!("FrameLoop: stopped");
        });

        Self {
            stop_flag,
            frames,
            thread_handle: Some(thread_handle),
        }
    }

    /// Stop the polling thread and wait for it to exit
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                tracing::warn!("FrameLoop: frame callback panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use vellum_core::dirty_flag;

    #[test]
    fn test_draws_only_when_dirty() {
        let dirty = dirty_flag();
        let (tx, rx) = mpsc::channel();
        let mut frame_loop =
            FrameLoop::start(Arc::clone(&dirty), Duration::from_millis(1), move || {
                let _ = tx.send(());
            });

        // Initially dirty: one frame
        rx.recv_timeout(Duration::from_secs(5)).unwrap();

        dirty.store(true, Ordering::Release);
        rx.recv_timeout(Duration::from_secs(5)).unwrap();

        frame_loop.stop();
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.frames(), 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_stops_on_drop() {
        let dirty = dirty_flag();
        let frame_loop = FrameLoop::start(dirty, Duration::from_millis(5), || {});
        assert!(frame_loop.is_running());
        drop(frame_loop);
    }
}
