//! Randomized orbiting dot parameters.
//!
//! The field is drawn once when the renderer mounts and never again; resizes
//! and surface recreation reuse the same parameters, so the composition only
//! drifts with time, never jumps.

use rand::Rng;

use crate::types::DOT_COUNT;

const ORBIT_RADIUS_MIN: f32 = 0.2;
const ORBIT_RADIUS_MAX: f32 = 1.0;
const ANGULAR_SPEED_MIN: f32 = 0.3;
const ANGULAR_SPEED_MAX: f32 = 1.0;
const OPACITY_MIN: f32 = 0.1;
const OPACITY_MAX: f32 = 0.5;

/// Gradient footprint radius as a fraction of the minor viewport dimension.
const DOT_RADIUS: f32 = 0.5;

/// One orbiting radial-gradient dot, in normalized viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    /// Orbit center in the unit square.
    pub center: [f32; 2],
    /// Orbit radius around the center.
    pub orbit_radius: f32,
    /// Phase angle at mount time, radians.
    pub start_angle: f32,
    /// Angular velocity, radians per second.
    pub angular_speed: f32,
    /// Peak blend weight at the gradient center.
    pub opacity: f32,
    /// Gradient radius as a fraction of `min(width, height)`.
    pub radius: f32,
}

impl Dot {
    /// Orbit position after `seconds` of animation, in normalized units.
    pub fn position_at(&self, seconds: f32) -> [f32; 2] {
        let angle = self.start_angle + seconds * self.angular_speed;
        [
            self.center[0] + angle.cos() * self.orbit_radius,
            self.center[1] + angle.sin() * self.orbit_radius,
        ]
    }
}

/// The fixed set of dots rendered every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DotField {
    dots: [Dot; DOT_COUNT],
}

impl DotField {
    /// Draws a fresh field from `rng`.
    ///
    /// The orbit center is sampled from an interval of width
    /// `max(0, 1 - 2 * orbit_radius)` centered in the viewport, so any orbit
    /// that can fit the unit square stays inside it; wider orbits degenerate
    /// to a pinned center at 0.5.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let dots = std::array::from_fn(|_| {
            let orbit_radius = rng.gen_range(ORBIT_RADIUS_MIN..ORBIT_RADIUS_MAX);
            let span = (1.0 - 2.0 * orbit_radius).max(0.0);
            let low = 0.5 - 0.5 * span;
            Dot {
                center: [low + rng.gen::<f32>() * span, low + rng.gen::<f32>() * span],
                orbit_radius,
                start_angle: rng.gen::<f32>() * std::f32::consts::TAU,
                angular_speed: rng.gen_range(ANGULAR_SPEED_MIN..ANGULAR_SPEED_MAX),
                opacity: rng.gen_range(OPACITY_MIN..OPACITY_MAX),
                radius: DOT_RADIUS,
            }
        });
        Self { dots }
    }

    pub fn dots(&self) -> &[Dot; DOT_COUNT] {
        &self.dots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn field_always_has_the_configured_dot_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = DotField::generate(&mut rng);
        assert_eq!(field.dots().len(), DOT_COUNT);
    }

    #[test]
    fn orbits_stay_inside_the_unit_square() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let field = DotField::generate(&mut rng);
            for dot in field.dots() {
                if dot.orbit_radius <= 0.5 {
                    for axis in 0..2 {
                        assert!(
                            dot.center[axis] - dot.orbit_radius >= -1e-6,
                            "seed {seed}: orbit leaves the viewport on the low side"
                        );
                        assert!(
                            dot.center[axis] + dot.orbit_radius <= 1.0 + 1e-6,
                            "seed {seed}: orbit leaves the viewport on the high side"
                        );
                    }
                } else {
                    // An orbit wider than the viewport pins its center.
                    assert_eq!(dot.center, [0.5, 0.5], "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn parameters_fall_in_their_documented_ranges() {
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let field = DotField::generate(&mut rng);
            for dot in field.dots() {
                assert!(
                    dot.orbit_radius >= ORBIT_RADIUS_MIN && dot.orbit_radius < ORBIT_RADIUS_MAX
                );
                assert!(dot.start_angle >= 0.0 && dot.start_angle < std::f32::consts::TAU);
                assert!(
                    dot.angular_speed >= ANGULAR_SPEED_MIN && dot.angular_speed < ANGULAR_SPEED_MAX
                );
                assert!(dot.opacity >= OPACITY_MIN && dot.opacity < OPACITY_MAX);
                assert_eq!(dot.radius, DOT_RADIUS);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_field() {
        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);
        assert_eq!(
            DotField::generate(&mut first),
            DotField::generate(&mut second)
        );
    }

    #[test]
    fn start_position_matches_the_orbit_origin() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = DotField::generate(&mut rng);
        for dot in field.dots() {
            let pos = dot.position_at(0.0);
            let expected_x = dot.center[0] + dot.start_angle.cos() * dot.orbit_radius;
            let expected_y = dot.center[1] + dot.start_angle.sin() * dot.orbit_radius;
            assert!((pos[0] - expected_x).abs() < 1e-6);
            assert!((pos[1] - expected_y).abs() < 1e-6);
        }
    }
}
