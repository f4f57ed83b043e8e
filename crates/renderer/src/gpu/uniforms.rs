use bytemuck::{Pod, Zeroable};

use crate::dots::Dot;
use crate::types::DOT_COUNT;

/// std140 mirror of the dot pass `FieldParams` uniform block.
///
/// The per-dot arrays replace the name-keyed uniform lookups of a classic GL
/// renderer: every slot is staged here and the whole block uploads in one
/// buffer write, so nothing on the hot path resolves uniforms by name.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct FieldUniforms {
    resolution: [f32; 2],
    time: f32,
    _pad0: f32,
    dot_center: [[f32; 4]; DOT_COUNT],
    dot_params: [[f32; 4]; DOT_COUNT],
}

unsafe impl Zeroable for FieldUniforms {}
unsafe impl Pod for FieldUniforms {}

impl FieldUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            time: 0.0,
            _pad0: 0.0,
            dot_center: [[0.0; 4]; DOT_COUNT],
            dot_params: [[0.0; 4]; DOT_COUNT],
        }
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = [width, height];
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.time = seconds;
    }

    /// Stages one dot's parameters in its two uniform lanes.
    pub fn set_dot(&mut self, index: usize, dot: &Dot) {
        if let Some(slot) = self.dot_center.get_mut(index) {
            *slot = [dot.center[0], dot.center[1], dot.orbit_radius, 0.0];
        }
        if let Some(slot) = self.dot_params.get_mut(index) {
            *slot = [dot.start_angle, dot.angular_speed, dot.opacity, dot.radius];
        }
    }
}

/// std140 mirror of the blur pass `BlurParams` uniform block.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct BlurUniforms {
    direction: [f32; 2],
    resolution: [f32; 2],
}

unsafe impl Zeroable for BlurUniforms {}
unsafe impl Pod for BlurUniforms {}

impl BlurUniforms {
    pub fn new(direction: [f32; 2], width: u32, height: u32) -> Self {
        Self {
            direction,
            resolution: [width as f32, height as f32],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_block_matches_its_std140_footprint() {
        // vec2 + float + pad, then two vec4 arrays of DOT_COUNT.
        assert_eq!(
            std::mem::size_of::<FieldUniforms>(),
            16 + DOT_COUNT * 16 * 2
        );
    }

    #[test]
    fn blur_block_matches_its_std140_footprint() {
        assert_eq!(std::mem::size_of::<BlurUniforms>(), 16);
    }

    #[test]
    fn set_dot_stages_both_lanes_in_order() {
        let dot = Dot {
            center: [0.25, 0.75],
            orbit_radius: 0.3,
            start_angle: 1.0,
            angular_speed: 0.5,
            opacity: 0.2,
            radius: 0.5,
        };
        let mut uniforms = FieldUniforms::new(100, 100);
        uniforms.set_dot(1, &dot);
        assert_eq!(uniforms.dot_center[1], [0.25, 0.75, 0.3, 0.0]);
        assert_eq!(uniforms.dot_params[1], [1.0, 0.5, 0.2, 0.5]);
        // Untouched slots stay zeroed.
        assert_eq!(uniforms.dot_center[0], [0.0; 4]);
    }

    #[test]
    fn set_dot_ignores_out_of_range_slots() {
        let dot = Dot {
            center: [0.5, 0.5],
            orbit_radius: 0.2,
            start_angle: 0.0,
            angular_speed: 0.3,
            opacity: 0.1,
            radius: 0.5,
        };
        let mut uniforms = FieldUniforms::new(1, 1);
        uniforms.set_dot(DOT_COUNT, &dot);
        assert_eq!(uniforms.dot_center, [[0.0; 4]; DOT_COUNT]);
    }
}
