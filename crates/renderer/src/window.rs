//! Reference host: a winit window that mounts the background renderer and
//! drives it through the redraw cycle, the way a page would mount the effect
//! into a full-screen canvas behind its content.
//!
//! Pacing is cooperative: exactly one frame is in flight, and the next redraw
//! is requested only after the previous frame presented, so the compositor's
//! refresh sets the cadence rather than a timer.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::types::{FrameStatus, SurfaceMetrics};
use crate::BackgroundRenderer;

/// Host-side window settings; the effect itself has no runtime knobs.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    pub title: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            surface_size: (1280, 800),
            title: "driftglow".to_string(),
        }
    }
}

/// Reads the host-measured logical size and scale factor for the window.
pub fn window_metrics(window: &Window) -> SurfaceMetrics {
    let scale_factor = window.scale_factor();
    let logical = window.inner_size().to_logical::<f64>(scale_factor);
    SurfaceMetrics::new(logical.width, logical.height, scale_factor)
}

/// Opens the preview window and runs the render loop until the window closes
/// or the environment turns out to be unsupported.
pub fn run_preview(config: PreviewConfig) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(PhysicalSize::new(config.surface_size.0, config.surface_size.1))
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create preview window: {err}"))?;
    let window = Arc::new(window);

    let Some(mut renderer) = BackgroundRenderer::mount(window.as_ref(), window_metrics(&window))?
    else {
        warn!("surface reported no GPU support; exiting without rendering");
        return Ok(());
    };
    info!(
        width = renderer.size().width,
        height = renderer.size().height,
        "background renderer mounted"
    );
    window.request_redraw();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);
            let Event::WindowEvent { window_id, event } = event else {
                return;
            };
            if window_id != window.id() {
                return;
            }
            match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    renderer.stop();
                    elwt.exit();
                }
                WindowEvent::RedrawRequested => {
                    match renderer.render_frame(window_metrics(&window)) {
                        Ok(FrameStatus::Presented) => {
                            // Schedule the next frame; the compositor paces us.
                            window.request_redraw();
                        }
                        Ok(FrameStatus::Stopped) => {}
                        Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure();
                            window.request_redraw();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("surface out of memory; shutting the preview down");
                            renderer.stop();
                            elwt.exit();
                        }
                        Err(other) => {
                            warn!(error = ?other, "surface error; retrying next frame");
                            window.request_redraw();
                        }
                    }
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))?;

    Ok(())
}
