//! Vellum Animation System
//!
//! Pull-based property animation for chart geometries and paints.
//!
//! # Features
//!
//! - **Motion Properties**: a named value with a current and target state,
//!   interpolated against the owner's frame clock
//! - **Animatables**: registries of motion properties sharing one clock and
//!   one validity flag
//! - **Easing**: standard easing curves plus cubic Bézier timing functions
//! - **Redirectable**: setting a new target mid-flight continues from the
//!   currently displayed value
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use vellum_animation::{Animatable, Animation, Easing};
//!
//! let mut shape = Animatable::new();
//! let x = shape.register("x", 0.0_f32).unwrap();
//! shape.set_transition(Some(Animation::new(Easing::Linear, Duration::from_millis(100))), None);
//!
//! shape.set(x, 100.0).unwrap();
//! shape.set_current_time(0);
//! assert_eq!(shape.get(x).unwrap(), 0.0);
//! shape.set_current_time(50);
//! assert_eq!(shape.get(x).unwrap(), 50.0);
//! ```

pub mod animatable;
pub mod easing;
pub mod error;
pub mod motion;
pub mod values;

pub use animatable::{Animatable, PropertyKey};
pub use easing::Easing;
pub use error::{MotionError, Result};
pub use motion::{Animation, MotionClock, MotionProperty};
pub use values::Interpolate;
