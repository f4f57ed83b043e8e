use winit::dpi::PhysicalSize;

/// Number of orbiting dots in the generated field.
pub const DOT_COUNT: usize = 5;

/// Number of horizontal+vertical blur pass pairs applied each frame.
pub const BLUR_PASSES: usize = 6;

/// Errors surfaced while bringing the renderer up.
///
/// Shader sources are embedded in the crate, so the compile and link variants
/// indicate a programming error rather than a runtime condition; both carry
/// the compiler diagnostic verbatim. There is no retry or fallback path for
/// any of these.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    /// The display surface cannot provide the GPU capabilities we need.
    #[error("display surface does not support GPU rendering: {0}")]
    Unsupported(String),
    /// A shader stage was rejected by the shader compiler.
    #[error("shader '{label}' failed to compile: {message}")]
    ShaderCompile {
        label: &'static str,
        message: String,
    },
    /// Pipeline assembly failed after both stages compiled.
    #[error("program '{label}' failed to link: {message}")]
    ProgramLink {
        label: &'static str,
        message: String,
    },
}

/// Host-reported sizing for the mounted surface.
///
/// The host measures the surface in logical (CSS-pixel-equivalent) units and
/// reports its device pixel ratio; everything GPU-side works in the derived
/// physical size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    pub logical_width: f64,
    pub logical_height: f64,
    pub scale_factor: f64,
}

impl SurfaceMetrics {
    pub fn new(logical_width: f64, logical_height: f64, scale_factor: f64) -> Self {
        Self {
            logical_width,
            logical_height,
            scale_factor,
        }
    }

    /// Device-pixel framebuffer size: logical size scaled by the device pixel
    /// ratio, floored, clamped to at least one pixel per axis.
    pub fn physical_size(&self) -> PhysicalSize<u32> {
        let width = (self.logical_width * self.scale_factor).floor().max(1.0);
        let height = (self.logical_height * self.scale_factor).floor().max(1.0);
        PhysicalSize::new(width as u32, height as u32)
    }
}

/// Outcome of one frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was rendered and handed to the compositor.
    Presented,
    /// The controller is stopped; nothing was drawn and no frame follows.
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_scales_logical_dimensions() {
        let metrics = SurfaceMetrics::new(800.0, 600.0, 1.0);
        assert_eq!(metrics.physical_size(), PhysicalSize::new(800, 600));

        let metrics = SurfaceMetrics::new(400.0, 300.0, 1.0);
        assert_eq!(metrics.physical_size(), PhysicalSize::new(400, 300));

        let metrics = SurfaceMetrics::new(800.0, 600.0, 2.0);
        assert_eq!(metrics.physical_size(), PhysicalSize::new(1600, 1200));
    }

    #[test]
    fn physical_size_floors_fractional_pixels() {
        let metrics = SurfaceMetrics::new(390.5, 844.0, 3.0);
        assert_eq!(metrics.physical_size(), PhysicalSize::new(1171, 2532));
    }

    #[test]
    fn physical_size_never_collapses_to_zero() {
        let metrics = SurfaceMetrics::new(0.0, 0.0, 1.0);
        assert_eq!(metrics.physical_size(), PhysicalSize::new(1, 1));
    }
}
