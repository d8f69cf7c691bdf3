//! WGSL source and GPU-side data layouts for disc rendering.
//!
//! Each particle is one instance of a six-vertex quad. The vertex stage
//! expands the quad around the disc centre in screen pixels and converts to
//! clip space; the fragment stage cuts the quad down to a filled circle.

use bytemuck::{Pod, Zeroable};

use crate::projection::Disc;

pub const DISC_SHADER: &str = r#"
struct Uniforms {
    screen: vec2<f32>,
    _padding: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) diameter: f32,
    @location(2) color: vec3<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[vertex_index];
    let pixel = center + corner * (diameter * 0.5);

    // Pixel origin is top-left with y down; clip space has y up.
    let ndc = vec2<f32>(
        pixel.x / uniforms.screen.x * 2.0 - 1.0,
        1.0 - pixel.y / uniforms.screen.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.color = color;
    out.uv = corner;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if length(in.uv) > 1.0 {
        discard;
    }
    return vec4<f32>(in.color, 1.0);
}
"#;

/// Vertices per disc quad.
pub const VERTICES_PER_DISC: u32 = 6;

/// Per-instance disc data, matching the vertex stage's locations 0-2.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DiscInstance {
    pub center: [f32; 2],
    pub diameter: f32,
    pub color: [f32; 3],
}

impl DiscInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32,
        2 => Float32x3
    ];

    /// Bytes needed to hold `count` instances.
    pub fn buffer_size(count: u32) -> wgpu::BufferAddress {
        count as wgpu::BufferAddress * std::mem::size_of::<DiscInstance>() as wgpu::BufferAddress
    }

    /// Largest instance count whose buffer fits in `max_buffer_size` bytes.
    pub fn max_count(max_buffer_size: u64) -> u64 {
        max_buffer_size / std::mem::size_of::<DiscInstance>() as u64
    }

    /// Instance-rate vertex buffer layout.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<DiscInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<Disc> for DiscInstance {
    /// Narrows to `f32` and saturates the colour into `[0, 1]`.
    fn from(disc: Disc) -> Self {
        Self {
            center: [disc.center.x as f32, disc.center.y as f32],
            diameter: disc.diameter as f32,
            color: disc.color.to_unit(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub screen: [f32; 2],
    pub _padding: [f32; 2],
}

impl Uniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: [width as f32, height as f32],
            _padding: [0.0; 2],
        }
    }
}
