//! Embedded shader sources and their compilation into `wgpu` modules.
//!
//! All three stages are fixed GLSL compiled through naga's frontend. Each
//! compilation runs under a validation error scope so a rejected stage
//! surfaces the compiler diagnostic instead of tripping the global error
//! handler.

use std::borrow::Cow;

use wgpu::naga::ShaderStage;

use crate::types::{RendererError, DOT_COUNT};

/// Compiles the shared full-screen quad vertex stage.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule, RendererError> {
    compile_stage(
        device,
        "fullscreen quad vertex",
        ShaderStage::Vertex,
        Cow::Borrowed(VERTEX_SHADER_GLSL),
    )
}

/// Compiles the dot rasterizer fragment stage.
pub(crate) fn compile_dot_fragment(device: &wgpu::Device) -> Result<wgpu::ShaderModule, RendererError> {
    compile_stage(
        device,
        "dot field fragment",
        ShaderStage::Fragment,
        Cow::Owned(dot_fragment_source()),
    )
}

/// Compiles the separable blur fragment stage.
pub(crate) fn compile_blur_fragment(device: &wgpu::Device) -> Result<wgpu::ShaderModule, RendererError> {
    compile_stage(
        device,
        "separable blur fragment",
        ShaderStage::Fragment,
        Cow::Borrowed(BLUR_FRAGMENT_GLSL),
    )
}

fn compile_stage(
    device: &wgpu::Device,
    label: &'static str,
    stage: ShaderStage,
    shader: Cow<'static, str>,
) -> Result<wgpu::ShaderModule, RendererError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader,
            stage,
            defines: &[],
        },
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(RendererError::ShaderCompile {
            label,
            message: error.to_string(),
        });
    }
    Ok(module)
}

/// Splices the compile-time dot count into the fragment template so the
/// shader loop and its uniform arrays always match [`DOT_COUNT`].
pub(crate) fn dot_fragment_source() -> String {
    DOT_FRAGMENT_TEMPLATE.replace("%COUNT%", &DOT_COUNT.to_string())
}

/// Passes the shared quad through unchanged and derives a [0,1] UV from the
/// [-1,1] clip-space position.
const VERTEX_SHADER_GLSL: &str = r"#version 450

layout(location = 0) in vec2 a_position;
layout(location = 0) out vec2 v_uv;

void main() {
    v_uv = a_position * 0.5 + 0.5;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
";

/// Evaluates every orbiting dot analytically per pixel and composites it over
/// a white background. The uniform block layout must match `FieldUniforms`.
const DOT_FRAGMENT_TEMPLATE: &str = r"#version 450

layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 out_color;

layout(std140, set = 0, binding = 0) uniform FieldParams {
    vec2 resolution;
    float time;
    float _pad0;
    vec4 dot_center[%COUNT%];
    vec4 dot_params[%COUNT%];
} field;

void main() {
    vec2 frag_pos = v_uv * field.resolution;
    float min_dim = min(field.resolution.x, field.resolution.y);

    vec3 dot_color = vec3(0.333, 0.333, 0.333);
    vec3 result = vec3(1.0);

    for (int i = 0; i < %COUNT%; i++) {
        float angle = field.dot_params[i].x + field.time * field.dot_params[i].y;
        vec2 center = field.dot_center[i].xy + vec2(cos(angle), sin(angle)) * field.dot_center[i].z;

        vec2 dot_pos = center * field.resolution;
        float dist = length(frag_pos - dot_pos);

        float dot_radius = field.dot_params[i].w * min_dim;
        float gradient = 1.0 - smoothstep(0.0, dot_radius, dist);

        result = mix(result, dot_color, gradient * field.dot_params[i].z);
    }

    out_color = vec4(result, 1.0);
}
";

/// One directional 1D pass of the separable Gaussian. The uniform block
/// layout must match `BlurUniforms`.
const BLUR_FRAGMENT_GLSL: &str = r"#version 450

layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 out_color;

layout(std140, set = 0, binding = 0) uniform BlurParams {
    vec2 direction;
    vec2 resolution;
} blur;

layout(set = 1, binding = 0) uniform texture2D source_texture;
layout(set = 1, binding = 1) uniform sampler source_sampler;

void main() {
    vec2 texel_size = 1.0 / blur.resolution;
    vec3 result = vec3(0.0);

    // 9-tap Gaussian collapsed to 5 bilinear samples per direction.
    float weights[5] = float[5](0.227027, 0.194596, 0.121622, 0.054054, 0.016216);
    float offsets[5] = float[5](0.0, 1.3846153846, 3.2307692308, 5.0769230769, 6.9230769231);

    for (int i = 0; i < 5; i++) {
        vec2 off = blur.direction * offsets[i] * texel_size;
        result += texture(sampler2D(source_texture, source_sampler), v_uv + off).rgb * weights[i];
        if (i > 0) {
            result += texture(sampler2D(source_texture, source_sampler), v_uv - off).rgb * weights[i];
        }
    }

    out_color = vec4(result, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_template_expands_to_the_configured_count() {
        let source = dot_fragment_source();
        assert!(!source.contains("%COUNT%"));
        assert!(source.contains(&format!("vec4 dot_center[{DOT_COUNT}]")));
        assert!(source.contains(&format!("i < {DOT_COUNT}")));
    }

    #[test]
    fn blur_kernel_carries_the_expected_taps() {
        assert!(BLUR_FRAGMENT_GLSL.contains("0.227027"));
        assert!(BLUR_FRAGMENT_GLSL.contains("0.016216"));
        assert!(BLUR_FRAGMENT_GLSL.contains("6.9230769231"));
    }

    #[test]
    fn vertex_stage_remaps_clip_space_to_uv() {
        assert!(VERTEX_SHADER_GLSL.contains("a_position * 0.5 + 0.5"));
    }
}
