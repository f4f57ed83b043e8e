use std::time::{Duration, Instant};

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::debug;
use winit::dpi::PhysicalSize;

use crate::dots::DotField;
use crate::runtime::TimeSample;
use crate::types::{RendererError, BLUR_PASSES};

use super::blur::{blur_schedule, BlurDirection, BlurSource, BlurStep, BlurTarget};
use super::context::GpuContext;
use super::pipeline::{build_programs, create_quad_buffer, PipelineLayouts, Programs, QUAD_VERTICES};
use super::targets::TargetSet;
use super::uniforms::{BlurUniforms, FieldUniforms};

/// Everything the frame path touches, exclusively owned by the controller.
pub(crate) struct GpuState {
    context: GpuContext,
    layouts: PipelineLayouts,
    programs: Programs,
    quad: wgpu::Buffer,
    field_uniforms: FieldUniforms,
    field_buffer: wgpu::Buffer,
    field_bind_group: wgpu::BindGroup,
    blur_buffers: [wgpu::Buffer; 2],
    blur_bind_groups: [wgpu::BindGroup; 2],
    targets: TargetSet,
    schedule: Vec<BlurStep>,
    dot_field: DotField,
    last_stats: Instant,
    frames_since_stats: u32,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        dot_field: DotField,
    ) -> Result<Self, RendererError>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size)?;
        let layouts = PipelineLayouts::new(&context.device);
        let programs = build_programs(&context.device, &layouts, context.surface_format)?;
        let quad = create_quad_buffer(&context.device);

        let field_uniforms = FieldUniforms::new(context.size.width, context.size.height);
        let field_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dot field uniforms"),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let field_bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dot field uniforms"),
            layout: &layouts.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: field_buffer.as_entire_binding(),
            }],
        });

        let (blur_buffers, blur_bind_groups) =
            create_blur_bindings(&context, &layouts, context.size);

        let targets = TargetSet::new(&context.device, &layouts, context.surface_format, context.size);

        Ok(Self {
            context,
            layouts,
            programs,
            quad,
            field_uniforms,
            field_buffer,
            field_bind_group,
            blur_buffers,
            blur_bind_groups,
            targets,
            schedule: blur_schedule(BLUR_PASSES),
            dot_field,
            last_stats: Instant::now(),
            frames_since_stats: 0,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub(crate) fn dot_field(&self) -> &DotField {
        &self.dot_field
    }

    /// Brings the swapchain and offscreen targets to `new_size`.
    ///
    /// A call with the current size is a cheap no-op; a changed size
    /// reconfigures the surface, replaces all three targets, and refreshes
    /// the per-direction blur uniforms with the new texel scale.
    pub(crate) fn resize_if_needed(&mut self, new_size: PhysicalSize<u32>) -> bool {
        if new_size == self.context.size || new_size.width == 0 || new_size.height == 0 {
            return false;
        }

        self.context.resize(new_size);
        self.targets.recreate(
            &self.context.device,
            &self.layouts,
            self.context.surface_format,
            new_size,
        );
        for (direction, buffer) in [BlurDirection::Horizontal, BlurDirection::Vertical]
            .into_iter()
            .zip(self.blur_buffers.iter())
        {
            let uniforms = BlurUniforms::new(direction.as_vector(), new_size.width, new_size.height);
            self.context
                .queue
                .write_buffer(buffer, 0, bytemuck::bytes_of(&uniforms));
        }
        debug!(
            width = new_size.width,
            height = new_size.height,
            "recreated render targets"
        );
        true
    }

    /// Re-applies the surface configuration after the swapchain was lost.
    pub(crate) fn reconfigure(&self) {
        self.context.reconfigure();
    }

    /// Runs one full frame: the dot pass into the scene target, the blur
    /// sequence across the scratch targets, the final sub-pass into the
    /// acquired swapchain texture, then presents.
    pub(crate) fn render(&mut self, time: TimeSample) -> Result<(), wgpu::SurfaceError> {
        // The resize check runs before every frame, so this cannot drift.
        debug_assert_eq!(self.targets.size(), self.context.size);

        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.field_uniforms.set_time(time.seconds);
        self.field_uniforms
            .set_resolution(self.context.size.width as f32, self.context.size.height as f32);
        for (index, dot) in self.dot_field.dots().iter().enumerate() {
            self.field_uniforms.set_dot(index, dot);
        }
        self.context
            .queue
            .write_buffer(&self.field_buffer, 0, bytemuck::bytes_of(&self.field_uniforms));

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        self.encode_pass(
            &mut encoder,
            &self.targets.scene.view,
            &self.programs.dot.pipeline,
            &self.field_bind_group,
            None,
        );

        for step in &self.schedule {
            let source = match step.source {
                BlurSource::Scene => &self.targets.scene,
                BlurSource::Ping => &self.targets.ping,
                BlurSource::Pong => &self.targets.pong,
            };
            let target_view = match step.target {
                BlurTarget::Ping => &self.targets.ping.view,
                BlurTarget::Pong => &self.targets.pong.view,
                BlurTarget::Surface => &view,
            };
            self.encode_pass(
                &mut encoder,
                target_view,
                &self.programs.blur.pipeline,
                &self.blur_bind_groups[step.direction.index()],
                Some(&source.read_bind_group),
            );
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        self.note_frame(time);
        Ok(())
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        pipeline: &wgpu::RenderPipeline,
        uniforms: &wgpu::BindGroup,
        source: Option<&wgpu::BindGroup>,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("fullscreen pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, uniforms, &[]);
        if let Some(source) = source {
            pass.set_bind_group(1, source, &[]);
        }
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
    }

    fn note_frame(&mut self, time: TimeSample) {
        self.frames_since_stats += 1;
        let elapsed = self.last_stats.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frames_since_stats as f32 / elapsed.as_secs_f32();
            debug!(
                fps = fps.round(),
                frame = time.frame_index,
                time = time.seconds,
                "render stats"
            );
            self.frames_since_stats = 0;
            self.last_stats = Instant::now();
        }
    }
}

fn create_blur_bindings(
    context: &GpuContext,
    layouts: &PipelineLayouts,
    size: PhysicalSize<u32>,
) -> ([wgpu::Buffer; 2], [wgpu::BindGroup; 2]) {
    use wgpu::util::DeviceExt;

    let buffers = [BlurDirection::Horizontal, BlurDirection::Vertical].map(|direction| {
        let uniforms = BlurUniforms::new(direction.as_vector(), size.width, size.height);
        context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(match direction {
                    BlurDirection::Horizontal => "horizontal blur uniforms",
                    BlurDirection::Vertical => "vertical blur uniforms",
                }),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
    });

    let bind_groups = [0usize, 1].map(|index| {
        context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blur uniforms"),
            layout: &layouts.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffers[index].as_entire_binding(),
            }],
        })
    });

    (buffers, bind_groups)
}
