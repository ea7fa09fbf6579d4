//! Path effects and image filters carried by a paint
//!
//! Both kinds can be transitioned. When the two sides are not the same kind
//! of effect (or have a different shape, such as a dash pattern with a
//! different number of intervals) the source is kept until the transition
//! ends and the target is used from then on.

use smallvec::SmallVec;
use vellum_animation::Interpolate;
use vellum_core::{Color, LayerEffect, Stroke};

/// Effect applied to the outline of stroked geometries
#[derive(Clone, Debug, PartialEq)]
pub enum PathEffect {
    /// Dashed line: alternating on/off interval lengths, shifted by `phase`
    Dash {
        intervals: SmallVec<[f32; 4]>,
        phase: f32,
    },
}

impl PathEffect {
    pub fn dash(intervals: &[f32], phase: f32) -> Self {
        PathEffect::Dash {
            intervals: SmallVec::from_slice(intervals),
            phase,
        }
    }

    /// Write this effect into a backend stroke
    pub fn apply_to(&self, stroke: &mut Stroke) {
        match self {
            PathEffect::Dash { intervals, phase } => {
                stroke.dash = intervals.clone();
                stroke.dash_offset = *phase;
            }
        }
    }

    pub fn transitionate(&self, progress: f32, target: &PathEffect) -> PathEffect {
        match (self, target) {
            (
                PathEffect::Dash { intervals, phase },
                PathEffect::Dash {
                    intervals: to_intervals,
                    phase: to_phase,
                },
            ) if intervals.len() == to_intervals.len() => PathEffect::Dash {
                intervals: intervals
                    .iter()
                    .zip(to_intervals.iter())
                    .map(|(a, b)| a.lerp(b, progress))
                    .collect(),
                phase: phase.lerp(to_phase, progress),
            },
            _ => switch_at_end(self, target, progress),
        }
    }
}

/// Filter applied to everything a paint draws
#[derive(Clone, Debug, PartialEq)]
pub enum ImageFilter {
    Blur {
        sigma_x: f32,
        sigma_y: f32,
    },
    DropShadow {
        dx: f32,
        dy: f32,
        sigma_x: f32,
        sigma_y: f32,
        color: Color,
    },
    /// Several filters applied in order
    Compose(Vec<ImageFilter>),
}

impl ImageFilter {
    pub fn blur(sigma_x: f32, sigma_y: f32) -> Self {
        ImageFilter::Blur { sigma_x, sigma_y }
    }

    pub fn drop_shadow(dx: f32, dy: f32, sigma_x: f32, sigma_y: f32, color: Color) -> Self {
        ImageFilter::DropShadow {
            dx,
            dy,
            sigma_x,
            sigma_y,
            color,
        }
    }

    /// Backend layer effects, flattened in application order
    pub fn layer_effects(&self) -> Vec<LayerEffect> {
        let mut effects = Vec::new();
        self.collect_effects(&mut effects);
        effects
    }

    fn collect_effects(&self, out: &mut Vec<LayerEffect>) {
        match self {
            ImageFilter::Blur { sigma_x, sigma_y } => out.push(LayerEffect::Blur {
                sigma_x: *sigma_x,
                sigma_y: *sigma_y,
            }),
            ImageFilter::DropShadow {
                dx,
                dy,
                sigma_x,
                sigma_y,
                color,
            } => out.push(LayerEffect::DropShadow {
                dx: *dx,
                dy: *dy,
                sigma_x: *sigma_x,
                sigma_y: *sigma_y,
                color: *color,
            }),
            ImageFilter::Compose(filters) => {
                for filter in filters {
                    filter.collect_effects(out);
                }
            }
        }
    }

    pub fn transitionate(&self, progress: f32, target: &ImageFilter) -> ImageFilter {
        match (self, target) {
            (
                ImageFilter::Blur { sigma_x, sigma_y },
                ImageFilter::Blur {
                    sigma_x: to_x,
                    sigma_y: to_y,
                },
            ) => ImageFilter::Blur {
                sigma_x: sigma_x.lerp(to_x, progress),
                sigma_y: sigma_y.lerp(to_y, progress),
            },
            (
                ImageFilter::DropShadow {
                    dx,
                    dy,
                    sigma_x,
                    sigma_y,
                    color,
                },
                ImageFilter::DropShadow {
                    dx: to_dx,
                    dy: to_dy,
                    sigma_x: to_sx,
                    sigma_y: to_sy,
                    color: to_color,
                },
            ) => ImageFilter::DropShadow {
                dx: dx.lerp(to_dx, progress),
                dy: dy.lerp(to_dy, progress),
                sigma_x: sigma_x.lerp(to_sx, progress),
                sigma_y: sigma_y.lerp(to_sy, progress),
                color: color.lerp(to_color, progress),
            },
            (ImageFilter::Compose(filters), ImageFilter::Compose(to_filters))
                if filters.len() == to_filters.len() =>
            {
                ImageFilter::Compose(
                    filters
                        .iter()
                        .zip(to_filters)
                        .map(|(a, b)| a.transitionate(progress, b))
                        .collect(),
                )
            }
            _ => switch_at_end(self, target, progress),
        }
    }
}

fn switch_at_end<T: Clone>(source: &T, target: &T, progress: f32) -> T {
    if progress >= 1.0 {
        target.clone()
    } else {
        source.clone()
    }
}

/// Transition between optional effects
pub(crate) fn transitionate_option<T: Clone>(
    source: Option<&T>,
    target: Option<&T>,
    progress: f32,
    blend: impl FnOnce(&T, f32, &T) -> T,
) -> Option<T> {
    match (source, target) {
        (Some(a), Some(b)) => Some(blend(a, progress, b)),
        (a, b) => {
            if progress >= 1.0 {
                b.cloned()
            } else {
                a.cloned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_transition() {
        let a = PathEffect::dash(&[2.0, 2.0], 0.0);
        let b = PathEffect::dash(&[6.0, 4.0], 4.0);
        assert_eq!(
            a.transitionate(0.5, &b),
            PathEffect::dash(&[4.0, 3.0], 2.0)
        );
    }

    #[test]
    fn test_dash_shape_mismatch_switches_at_end() {
        let a = PathEffect::dash(&[2.0, 2.0], 0.0);
        let b = PathEffect::dash(&[6.0, 4.0, 1.0, 1.0], 0.0);
        assert_eq!(a.transitionate(0.5, &b), a);
        assert_eq!(a.transitionate(1.0, &b), b);
    }

    #[test]
    fn test_drop_shadow_transition() {
        let a = ImageFilter::drop_shadow(0.0, 0.0, 0.0, 0.0, Color::BLACK);
        let b = ImageFilter::drop_shadow(4.0, 4.0, 2.0, 2.0, Color::BLACK);
        assert_eq!(
            a.transitionate(0.5, &b),
            ImageFilter::drop_shadow(2.0, 2.0, 1.0, 1.0, Color::BLACK)
        );
    }

    #[test]
    fn test_compose_flattens() {
        let filter = ImageFilter::Compose(vec![
            ImageFilter::blur(1.0, 1.0),
            ImageFilter::Compose(vec![ImageFilter::drop_shadow(
                1.0,
                1.0,
                1.0,
                1.0,
                Color::BLACK,
            )]),
        ]);
        assert_eq!(filter.layer_effects().len(), 2);
    }

    #[test]
    fn test_optional_transition() {
        let blur = ImageFilter::blur(2.0, 2.0);
        let blend = |a: &ImageFilter, p: f32, b: &ImageFilter| a.transitionate(p, b);

        assert_eq!(transitionate_option(None, Some(&blur), 0.5, blend), None);
        assert_eq!(
            transitionate_option(None, Some(&blur), 1.0, blend),
            Some(blur.clone())
        );
        assert_eq!(
            transitionate_option(Some(&blur), None, 0.0, blend),
            Some(blur.clone())
        );
    }
}
