//! Motion properties
//!
//! A `MotionProperty` holds the value it is moving *from* and the value it is
//! moving *to*. Reads are pull-based: every call to `get_movement` computes
//! the progress from the owner's clock, so there is nothing to cancel when a
//! new target arrives mid-flight. The new transition simply starts from
//! whatever value is on screen at that moment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::easing::Easing;
use crate::values::Interpolate;

/// Timing of a transition: easing curve, duration and repeat count
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Easing curve applied to linear progress
    #[serde(default)]
    pub easing: Easing,
    /// Duration of one cycle in milliseconds
    pub duration_ms: u64,
    /// Extra cycles to run after the first one completes
    #[serde(default)]
    pub repeat: u32,
}

impl Animation {
    pub fn new(easing: Easing, duration: Duration) -> Self {
        Self {
            easing,
            duration_ms: duration.as_millis() as u64,
            repeat: 0,
        }
    }

    /// Repeat the transition `times` more times after it first completes
    pub fn with_repeat(mut self, times: u32) -> Self {
        self.repeat = times;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(Easing::EASE, Duration::from_millis(800))
    }
}

/// The owner-side state every motion property reads and writes
///
/// `current_time` is the frame time injected by the canvas. `is_valid` is
/// cleared whenever a property is still moving or receives a new target; it
/// is set again by the canvas, never by the property.
#[derive(Clone, Copy, Debug)]
pub struct MotionClock {
    pub current_time: u64,
    pub is_valid: bool,
}

impl Default for MotionClock {
    fn default() -> Self {
        Self {
            current_time: 0,
            is_valid: false,
        }
    }
}

/// A named value animated between a current and a target state
#[derive(Clone, Debug)]
pub struct MotionProperty<T: Interpolate> {
    name: &'static str,
    from: T,
    to: T,
    animation: Option<Animation>,
    start_time: Option<u64>,
    completed_cycles: u32,
    is_completed: bool,
}

impl<T: Interpolate> MotionProperty<T> {
    /// Create a settled property holding `value`
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            name,
            from: value.clone(),
            to: value,
            animation: None,
            start_time: None,
            completed_cycles: 0,
            is_completed: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Value the property started moving from
    pub fn current(&self) -> &T {
        &self.from
    }

    /// Value the property is moving towards
    pub fn target(&self) -> &T {
        &self.to
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn set_animation(&mut self, animation: Option<Animation>) {
        self.animation = animation;
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Redirect the property towards `value`
    ///
    /// The transition restarts from the value currently displayed, with its
    /// progress reset to zero on the owner's next read.
    pub fn set_movement(&mut self, value: T, clock: &mut MotionClock) {
        self.from = self.get_movement(clock);
        self.to = value;
        self.start_time = None;
        self.completed_cycles = 0;
        self.is_completed = false;
        clock.is_valid = false;
    }

    /// Value of the property at `clock.current_time`
    ///
    /// Clears `clock.is_valid` while the transition is still running. Once
    /// progress reaches 1 the property settles on its target and later reads
    /// return it directly.
    pub fn get_movement(&mut self, clock: &mut MotionClock) -> T {
        let animation = match self.animation {
            Some(animation) if animation.duration_ms > 0 && !self.is_completed => animation,
            _ => {
                self.settle();
                return self.to.clone();
            }
        };

        let start = *self.start_time.get_or_insert(clock.current_time);
        let elapsed = clock.current_time.saturating_sub(start);
        let mut progress = elapsed as f32 / animation.duration_ms as f32;

        if progress >= 1.0 {
            if self.completed_cycles < animation.repeat {
                self.completed_cycles += 1;
                self.start_time = Some(clock.current_time);
                progress = 0.0;
            } else {
                self.settle();
                return self.to.clone();
            }
        }

        clock.is_valid = false;
        self.from.lerp(&self.to, animation.easing.apply(progress))
    }

    /// Jump to the target, ending any running transition
    pub fn complete(&mut self) {
        self.settle();
    }

    fn settle(&mut self) {
        if !self.is_completed {
            tracing::trace!("motion property `{}` settled", self.name);
        }
        self.from = self.to.clone();
        self.start_time = None;
        self.is_completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::Color;

    fn linear(ms: u64) -> Option<Animation> {
        Some(Animation::new(Easing::Linear, Duration::from_millis(ms)))
    }

    #[test]
    fn test_without_animation_jumps_to_target() {
        let mut clock = MotionClock::default();
        let mut prop = MotionProperty::new("x", 0.0_f32);

        prop.set_movement(10.0, &mut clock);
        assert_eq!(prop.get_movement(&mut clock), 10.0);
        assert!(prop.is_completed());
    }

    #[test]
    fn test_interpolates_with_clock() {
        let mut clock = MotionClock::default();
        let mut prop = MotionProperty::new("x", 0.0_f32);
        prop.set_animation(linear(100));

        clock.current_time = 1_000;
        prop.set_movement(100.0, &mut clock);
        assert!(!clock.is_valid);

        // First read anchors the transition at the current frame
        assert_eq!(prop.get_movement(&mut clock), 0.0);

        clock.current_time = 1_025;
        assert!((prop.get_movement(&mut clock) - 25.0).abs() < 1e-4);

        clock.is_valid = true;
        clock.current_time = 1_100;
        assert_eq!(prop.get_movement(&mut clock), 100.0);
        assert!(prop.is_completed());
        assert_eq!(*prop.current(), 100.0);
        // Settled reads leave the owner valid
        assert!(clock.is_valid);
    }

    #[test]
    fn test_progress_clamped_past_end() {
        let mut clock = MotionClock::default();
        let mut prop = MotionProperty::new("x", 0.0_f32);
        prop.set_animation(linear(100));
        prop.set_movement(1.0, &mut clock);
        prop.get_movement(&mut clock);

        clock.current_time = 10_000;
        assert_eq!(prop.get_movement(&mut clock), 1.0);
    }

    #[test]
    fn test_redirect_starts_from_displayed_value() {
        let mut clock = MotionClock::default();
        let mut prop = MotionProperty::new("x", 0.0_f32);
        prop.set_animation(linear(100));

        prop.set_movement(100.0, &mut clock);
        prop.get_movement(&mut clock);
        clock.current_time = 50;
        assert!((prop.get_movement(&mut clock) - 50.0).abs() < 1e-4);

        prop.set_movement(0.0, &mut clock);
        assert!((*prop.current() - 50.0).abs() < 1e-4);
        assert_eq!(*prop.target(), 0.0);

        // Progress restarts from zero at the next read
        assert!((prop.get_movement(&mut clock) - 50.0).abs() < 1e-4);
        clock.current_time = 100;
        assert!((prop.get_movement(&mut clock) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_repeat_cycles() {
        let mut clock = MotionClock::default();
        let mut prop = MotionProperty::new("x", 0.0_f32);
        prop.set_animation(Some(
            Animation::new(Easing::Linear, Duration::from_millis(100)).with_repeat(1),
        ));

        prop.set_movement(10.0, &mut clock);
        prop.get_movement(&mut clock);

        clock.current_time = 100;
        assert_eq!(prop.get_movement(&mut clock), 0.0);
        assert!(!prop.is_completed());

        clock.current_time = 200;
        assert_eq!(prop.get_movement(&mut clock), 10.0);
        assert!(prop.is_completed());
    }

    #[test]
    fn test_color_property() {
        let mut clock = MotionClock::default();
        let mut prop = MotionProperty::new("color", Color::RED);
        prop.set_animation(linear(100));
        prop.set_movement(Color::BLUE, &mut clock);
        prop.get_movement(&mut clock);

        clock.current_time = 50;
        let mid = prop.get_movement(&mut clock);
        assert_eq!(mid, Color::rgba(127, 0, 127, 255));
    }

    #[test]
    fn test_complete() {
        let mut clock = MotionClock::default();
        let mut prop = MotionProperty::new("x", 0.0_f32);
        prop.set_animation(linear(100));
        prop.set_movement(5.0, &mut clock);

        prop.complete();
        assert!(prop.is_completed());
        assert_eq!(prop.get_movement(&mut clock), 5.0);
    }
}
