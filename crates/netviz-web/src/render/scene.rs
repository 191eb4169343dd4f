//! Scene pipelines and the uniform layouts shared with `scene.wgsl`.

use super::helpers::{self, ScenePipelineDesc, ADDITIVE};
use glam::{Mat4, Vec3};
use netviz_core::camera::OrbitCamera;
use netviz_core::constants::{
    AMBIENT_COLOR, AMBIENT_INTENSITY, FILL_LIGHT_COLOR, FILL_LIGHT_POSITION, FOG_COLOR,
    FOG_DENSITY, KEY_LIGHT_COLOR, KEY_LIGHT_POSITION, POINT_LIGHT_INTENSITY, POINT_LIGHT_RANGE,
};
use netviz_core::geometry::Vertex;
use netviz_core::palette::hex_to_rgb;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    right: [f32; 4],
    up: [f32; 4],
    fog: [f32; 4],
    ambient: [f32; 4],
    lights: [[f32; 4]; 4],
}

impl FrameUniforms {
    pub(crate) fn new(camera: &OrbitCamera) -> Self {
        let (right, up) = camera.right_up();
        let ambient = srgb_to_linear(hex_to_rgb(AMBIENT_COLOR)) * AMBIENT_INTENSITY;
        let light = |pos: Vec3, hex: u32| {
            [
                pos.extend(POINT_LIGHT_RANGE).to_array(),
                (srgb_to_linear(hex_to_rgb(hex)) * POINT_LIGHT_INTENSITY)
                    .extend(1.0)
                    .to_array(),
            ]
        };
        let [key_pos, key_col] = light(KEY_LIGHT_POSITION, KEY_LIGHT_COLOR);
        let [fill_pos, fill_col] = light(FILL_LIGHT_POSITION, FILL_LIGHT_COLOR);
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            eye: camera.eye().extend(1.0).to_array(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
            fog: fog_color().extend(FOG_DENSITY).to_array(),
            ambient: ambient.extend(1.0).to_array(),
            lights: [key_pos, key_col, fill_pos, fill_col],
        }
    }
}

/// Per-primitive uniforms; field meanings follow `Object` in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
    pub(crate) emissive: [f32; 4],
    pub(crate) aux: [f32; 4],
    pub(crate) params: [f32; 4],
}

impl ObjectUniforms {
    pub(crate) fn new(model: Mat4, color: Vec3, opacity: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.extend(opacity).to_array(),
            emissive: [0.0; 4],
            aux: [0.0; 4],
            params: [0.0; 4],
        }
    }
}

pub(crate) fn srgb_to_linear(c: Vec3) -> Vec3 {
    let f = |v: f32| {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(f(c.x), f(c.y), f(c.z))
}

pub(crate) fn fog_color() -> Vec3 {
    srgb_to_linear(hex_to_rgb(FOG_COLOR))
}

/// Which scene pipeline draws a primitive. Declaration order is draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum DrawKind {
    Standard,
    Stars,
    Lines,
    Glow,
    Beam,
    Sprite,
}

impl DrawKind {
    pub(crate) const ORDER: [DrawKind; 6] = [
        DrawKind::Standard,
        DrawKind::Stars,
        DrawKind::Lines,
        DrawKind::Glow,
        DrawKind::Beam,
        DrawKind::Sprite,
    ];
}

pub(crate) struct ScenePipelines {
    pub(crate) frame_bgl: wgpu::BindGroupLayout,
    pub(crate) object_bgl: wgpu::BindGroupLayout,
    standard: wgpu::RenderPipeline,
    stars: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    glow: wgpu::RenderPipeline,
    beam: wgpu::RenderPipeline,
    sprite: wgpu::RenderPipeline,
}

impl ScenePipelines {
    pub(crate) fn get(&self, kind: DrawKind) -> &wgpu::RenderPipeline {
        match kind {
            DrawKind::Standard => &self.standard,
            DrawKind::Stars => &self.stars,
            DrawKind::Lines => &self.lines,
            DrawKind::Glow => &self.glow,
            DrawKind::Beam => &self.beam,
            DrawKind::Sprite => &self.sprite,
        }
    }
}

const MESH_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
const LINE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const STAR_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Position then color, one per star instance.
pub(crate) const STAR_STRIDE: u64 = 6 * 4;
pub(crate) const LINE_STRIDE: u64 = 3 * 4;

pub(crate) fn create_scene_pipelines(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> ScenePipelines {
    let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };
    let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("frame_bgl"),
        entries: &[uniform_entry(0)],
    });
    let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("object_bgl"),
        entries: &[
            uniform_entry(0),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_scene"),
        bind_group_layouts: &[&frame_bgl, &object_bgl],
        push_constant_ranges: &[],
    });

    let mesh_buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &MESH_ATTRS,
    }];
    let line_buffers = [wgpu::VertexBufferLayout {
        array_stride: LINE_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &LINE_ATTRS,
    }];
    let star_buffers = [wgpu::VertexBufferLayout {
        array_stride: STAR_STRIDE,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &STAR_ATTRS,
    }];

    let make = |desc: ScenePipelineDesc<'_>| {
        helpers::make_scene_pipeline(device, &layout, shader, color_format, &desc)
    };
    let triangles = wgpu::PrimitiveTopology::TriangleList;

    ScenePipelines {
        standard: make(ScenePipelineDesc {
            label: "standard_pipeline",
            vs_entry: "vs_mesh",
            fs_entry: "fs_standard",
            buffers: &mesh_buffers,
            topology: triangles,
            cull_mode: Some(wgpu::Face::Back),
            blend: wgpu::BlendState::ALPHA_BLENDING,
            depth_write: true,
        }),
        stars: make(ScenePipelineDesc {
            label: "stars_pipeline",
            vs_entry: "vs_point",
            fs_entry: "fs_point",
            buffers: &star_buffers,
            topology: triangles,
            cull_mode: None,
            blend: wgpu::BlendState::ALPHA_BLENDING,
            depth_write: false,
        }),
        lines: make(ScenePipelineDesc {
            label: "lines_pipeline",
            vs_entry: "vs_line",
            fs_entry: "fs_line",
            buffers: &line_buffers,
            topology: wgpu::PrimitiveTopology::LineList,
            cull_mode: None,
            blend: ADDITIVE,
            depth_write: false,
        }),
        glow: make(ScenePipelineDesc {
            label: "glow_pipeline",
            vs_entry: "vs_mesh",
            fs_entry: "fs_glow",
            buffers: &mesh_buffers,
            topology: triangles,
            cull_mode: Some(wgpu::Face::Front),
            blend: ADDITIVE,
            depth_write: false,
        }),
        beam: make(ScenePipelineDesc {
            label: "beam_pipeline",
            vs_entry: "vs_mesh",
            fs_entry: "fs_beam",
            buffers: &mesh_buffers,
            topology: triangles,
            cull_mode: None,
            blend: ADDITIVE,
            depth_write: false,
        }),
        sprite: make(ScenePipelineDesc {
            label: "sprite_pipeline",
            vs_entry: "vs_sprite",
            fs_entry: "fs_sprite",
            buffers: &[],
            topology: triangles,
            cull_mode: None,
            blend: wgpu::BlendState::ALPHA_BLENDING,
            depth_write: false,
        }),
        frame_bgl,
        object_bgl,
    }
}
