//! Animated dot-field background renderer.
//!
//! Renders a handful of softly glowing dots orbiting over a white canvas,
//! then diffuses them with a repeated separable Gaussian blur, producing the
//! kind of slow ambient backdrop that sits behind foreground content. The
//! overall flow is:
//!
//! ```text
//!   host surface + SurfaceMetrics
//!          │ mount()
//!          ▼
//!   BackgroundRenderer ──▶ GpuState ──▶ dot pass ──▶ scene target
//!          │ render_frame()                              │
//!          │                                             ▼
//!          │                 blur ping-pong (6 × H/V) ──▶ swapchain
//!          └─ stop()   (terminal; no further frames)
//! ```
//!
//! [`BackgroundRenderer`] owns all GPU resources and the frame lifecycle for
//! one mounted surface; [`window`] provides the reference `winit` host that
//! drives it through the redraw cycle. Everything the effect shows is decided
//! at mount time: the dot field is generated once and only the clock moves it.

mod compile;
pub mod dots;
mod gpu;
pub mod runtime;
pub mod types;
pub mod window;

pub use dots::{Dot, DotField};
pub use types::{FrameStatus, RendererError, SurfaceMetrics, BLUR_PASSES, DOT_COUNT};

use rand::rngs::StdRng;
use rand::SeedableRng;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::warn;

use gpu::GpuState;
use runtime::{LoopControl, SystemTimeSource, TimeSource};

/// Owns the GPU resources and the frame lifecycle for one mounted surface.
pub struct BackgroundRenderer {
    gpu: GpuState,
    clock: SystemTimeSource,
    control: LoopControl,
}

impl BackgroundRenderer {
    /// Brings the effect up on `target`: checks GPU support, generates the
    /// dot field, builds both programs and the shared quad, allocates the
    /// render targets, and captures the clock origin.
    ///
    /// Returns `Ok(None)` when the surface cannot provide the required GPU
    /// capabilities; the condition is reported once via tracing and is
    /// non-fatal for the caller. Shader compile and link failures propagate
    /// as errors since the sources are fixed.
    pub fn mount<T>(target: &T, metrics: SurfaceMetrics) -> Result<Option<Self>, RendererError>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let mut rng = StdRng::from_entropy();
        let dot_field = DotField::generate(&mut rng);

        let gpu = match GpuState::new(target, metrics.physical_size(), dot_field) {
            Ok(gpu) => gpu,
            Err(RendererError::Unsupported(reason)) => {
                warn!(%reason, "GPU rendering unavailable; background will not start");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let mut control = LoopControl::new();
        control.start();

        Ok(Some(Self {
            gpu,
            clock: SystemTimeSource::new(),
            control,
        }))
    }

    /// Renders one frame against the host's current metrics.
    ///
    /// The resize check runs first every frame: unchanged dimensions cost a
    /// comparison, changed dimensions replace all render targets before any
    /// pass encodes. After a stop this is a no-op.
    pub fn render_frame(&mut self, metrics: SurfaceMetrics) -> Result<FrameStatus, wgpu::SurfaceError> {
        if !self.control.should_render() {
            return Ok(FrameStatus::Stopped);
        }
        self.gpu.resize_if_needed(metrics.physical_size());
        let sample = self.clock.sample();
        self.gpu.render(sample)?;
        Ok(FrameStatus::Presented)
    }

    /// Stops the frame loop. Idempotent; there is no resume. GPU resources
    /// stay alive until the renderer drops with the host's surface teardown.
    pub fn stop(&mut self) {
        self.control.stop();
    }

    pub fn is_stopped(&self) -> bool {
        !self.control.should_render()
    }

    /// The immutable dot parameters generated at mount.
    pub fn dot_field(&self) -> &DotField {
        self.gpu.dot_field()
    }

    /// Current device-pixel framebuffer size.
    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.gpu.size()
    }

    /// Re-applies the surface configuration after `SurfaceError::Lost` or
    /// `SurfaceError::Outdated`.
    pub fn reconfigure(&self) {
        self.gpu.reconfigure();
    }
}
