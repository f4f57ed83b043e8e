use winit::dpi::PhysicalSize;

use super::pipeline::PipelineLayouts;

/// Offscreen color target plus the bind group used to sample it back.
pub(crate) struct OffscreenTarget {
    pub _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub read_bind_group: wgpu::BindGroup,
}

impl OffscreenTarget {
    fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
        sampler: &wgpu::Sampler,
        label: &'static str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let read_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layouts.blur_source_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            _texture: texture,
            view,
            read_bind_group,
        }
    }
}

/// The three device-pixel-sized color targets used each frame: the dot pass
/// output plus the two blur scratch targets.
///
/// Targets are never resized in place. When the surface's physical size
/// changes, all three are replaced in one step before the frame's passes run,
/// so no pass ever sees mismatched dimensions.
pub(crate) struct TargetSet {
    pub scene: OffscreenTarget,
    pub ping: OffscreenTarget,
    pub pong: OffscreenTarget,
    sampler: wgpu::Sampler,
    size: PhysicalSize<u32>,
}

impl TargetSet {
    pub(crate) fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
    ) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let scene = OffscreenTarget::new(device, layouts, format, size, &sampler, "dot field target");
        let ping = OffscreenTarget::new(device, layouts, format, size, &sampler, "blur ping target");
        let pong = OffscreenTarget::new(device, layouts, format, size, &sampler, "blur pong target");
        Self {
            scene,
            ping,
            pong,
            sampler,
            size,
        }
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Replaces all three targets at the new size; the old textures drop here.
    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
    ) {
        self.scene =
            OffscreenTarget::new(device, layouts, format, size, &self.sampler, "dot field target");
        self.ping =
            OffscreenTarget::new(device, layouts, format, size, &self.sampler, "blur ping target");
        self.pong =
            OffscreenTarget::new(device, layouts, format, size, &self.sampler, "blur pong target");
        self.size = size;
    }
}
