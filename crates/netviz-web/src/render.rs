//! WebGPU implementation of the core's rendering capability.
//!
//! Every primitive owns a small uniform buffer and bind group; meshes share
//! vertex data per unit mesh, and gradient and label textures are cached by
//! content. A frame draws the scene into an HDR target, then runs the bloom
//! chain and composites to the swapchain with tone mapping.

mod helpers;
mod labels;
mod post;
mod scene;
mod targets;

use crate::constants::{GRADIENT_SIZE, LABEL_CANVAS_HEIGHT, LABEL_CANVAS_WIDTH};
use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};
use helpers::SampledTexture;
use netviz_core::backend::{
    LinesDesc, Material, MeshDesc, PointsDesc, PrimitiveDesc, PrimitiveHandle, RenderBackend,
    RenderError, SpriteDesc,
};
use netviz_core::camera::OrbitCamera;
use netviz_core::constants::{BLOOM_RADIUS, BLOOM_THRESHOLD, TONE_MAPPING_EXPOSURE};
use netviz_core::geometry::MeshData;
use netviz_core::palette::{radial_gradient_rgba, to_rgb8};
use post::{PostBindGroups, PostPass, PostResources, PostUniforms};
use scene::{DrawKind, FrameUniforms, ObjectUniforms, ScenePipelines};
use std::rc::Rc;
use targets::RenderTargets;
use web_sys as web;
use wgpu;
use wgpu::util::DeviceExt;

struct GpuMesh {
    // Keeps the cache key's allocation alive.
    _source: Rc<MeshData>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

enum Geometry {
    Mesh(Rc<GpuMesh>),
    Lines {
        buffer: Option<wgpu::Buffer>,
        vertex_count: u32,
    },
    Stars {
        buffer: Option<wgpu::Buffer>,
        instance_count: u32,
    },
    Quad,
}

struct GpuPrimitive {
    kind: DrawKind,
    geometry: Geometry,
    visible: bool,
    uniforms: ObjectUniforms,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    post_groups: PostBindGroups,

    scene: ScenePipelines,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    white: Rc<SampledTexture>,

    meshes: FnvHashMap<usize, Rc<GpuMesh>>,
    gradients: FnvHashMap<[u8; 3], Rc<SampledTexture>>,
    labels: FnvHashMap<(String, [u8; 3]), Rc<SampledTexture>>,
    primitives: FnvHashMap<PrimitiveHandle, GpuPrimitive>,
    next_handle: u32,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    bloom_strength: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(netviz_core::POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, targets::HDR_FORMAT, format);
        let post_groups = post::create_post_bind_groups(&device, &post, &targets, &linear_sampler);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(netviz_core::SCENE_WGSL.into()),
        });
        let scene = scene::create_scene_pipelines(&device, &scene_shader, targets::HDR_FORMAT);
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &scene.frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });
        let white = Rc::new(helpers::create_rgba_texture(
            &device,
            &queue,
            "white_tex",
            1,
            1,
            &[255, 255, 255, 255],
        ));

        let fog = scene::fog_color();
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            post,
            post_groups,
            scene,
            frame_buffer,
            frame_bind_group,
            white,
            meshes: FnvHashMap::default(),
            gradients: FnvHashMap::default(),
            labels: FnvHashMap::default(),
            primitives: FnvHashMap::default(),
            next_handle: 1,
            width,
            height,
            clear_color: wgpu::Color {
                r: f64::from(fog.x),
                g: f64::from(fog.y),
                b: f64::from(fog.z),
                a: 1.0,
            },
            bloom_strength: 0.0,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.rebuild_post_bind_groups();
        }
    }

    /// Reconfigure after the swapchain was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn rebuild_post_bind_groups(&mut self) {
        self.post_groups = post::create_post_bind_groups(
            &self.device,
            &self.post,
            &self.targets,
            &self.linear_sampler,
        );
    }

    fn object_bind_group(
        &self,
        uniforms: &ObjectUniforms,
        texture: &wgpu::TextureView,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("object_uniforms"),
                contents: bytemuck::bytes_of(uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: &self.scene.object_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.linear_sampler),
                },
            ],
        });
        (buffer, bind_group)
    }

    fn primitive(
        &self,
        kind: DrawKind,
        geometry: Geometry,
        visible: bool,
        uniforms: ObjectUniforms,
        texture: &wgpu::TextureView,
    ) -> GpuPrimitive {
        let (uniform_buffer, bind_group) = self.object_bind_group(&uniforms, texture);
        GpuPrimitive {
            kind,
            geometry,
            visible,
            uniforms,
            uniform_buffer,
            bind_group,
        }
    }

    fn vertex_buffer(&self, label: &str, contents: &[u8]) -> Option<wgpu::Buffer> {
        if contents.is_empty() {
            return None;
        }
        Some(
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents,
                    usage: wgpu::BufferUsages::VERTEX,
                }),
        )
    }

    fn mesh(&mut self, data: &Rc<MeshData>) -> Rc<GpuMesh> {
        let key = Rc::as_ptr(data) as usize;
        if let Some(mesh) = self.meshes.get(&key) {
            return mesh.clone();
        }
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertices"),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_indices"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let mesh = Rc::new(GpuMesh {
            _source: data.clone(),
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        });
        log::debug!(
            "[gpu] uploaded mesh: {} vertices, {} indices",
            data.vertices.len(),
            data.indices.len()
        );
        self.meshes.insert(key, mesh.clone());
        mesh
    }

    fn gradient(&mut self, color: Vec3) -> Rc<SampledTexture> {
        let key = to_rgb8(color);
        if let Some(view) = self.gradients.get(&key) {
            return view.clone();
        }
        let texels = radial_gradient_rgba(color, GRADIENT_SIZE);
        let view = Rc::new(helpers::create_rgba_texture(
            &self.device,
            &self.queue,
            "gradient_tex",
            GRADIENT_SIZE,
            GRADIENT_SIZE,
            &texels,
        ));
        self.gradients.insert(key, view.clone());
        view
    }

    fn label(&mut self, text: &str, color: Vec3) -> Result<Rc<SampledTexture>, RenderError> {
        let key = (text.to_string(), to_rgb8(color));
        if let Some(view) = self.labels.get(&key) {
            return Ok(view.clone());
        }
        let texels = labels::rasterize_label(text, color)
            .map_err(|e| RenderError::Device(format!("label {text:?}: {e}")))?;
        let view = Rc::new(helpers::create_rgba_texture(
            &self.device,
            &self.queue,
            "label_tex",
            LABEL_CANVAS_WIDTH,
            LABEL_CANVAS_HEIGHT,
            &texels,
        ));
        self.labels.insert(key, view.clone());
        Ok(view)
    }

    fn make_stars(&self, d: &PointsDesc) -> GpuPrimitive {
        let data: Vec<f32> = d
            .positions
            .iter()
            .zip(&d.colors)
            .flat_map(|(p, c)| [p.x, p.y, p.z, c.x, c.y, c.z])
            .collect();
        let instance_count = (data.len() as u64 * 4 / scene::STAR_STRIDE) as u32;
        let mut uniforms = ObjectUniforms::new(Mat4::IDENTITY, Vec3::ONE, d.opacity);
        uniforms.params[2] = d.size;
        let geometry = Geometry::Stars {
            buffer: self.vertex_buffer("star_instances", bytemuck::cast_slice(&data)),
            instance_count,
        };
        self.primitive(DrawKind::Stars, geometry, true, uniforms, &self.white.view)
    }

    fn make_lines(&self, d: &LinesDesc) -> GpuPrimitive {
        let data: Vec<f32> = d
            .segments
            .iter()
            .flat_map(|[a, b]| [a.x, a.y, a.z, b.x, b.y, b.z])
            .collect();
        let vertex_count = (data.len() as u64 * 4 / scene::LINE_STRIDE) as u32;
        let uniforms =
            ObjectUniforms::new(Mat4::IDENTITY, scene::srgb_to_linear(d.color), d.opacity);
        let geometry = Geometry::Lines {
            buffer: self.vertex_buffer("line_vertices", bytemuck::cast_slice(&data)),
            vertex_count,
        };
        self.primitive(DrawKind::Lines, geometry, d.visible, uniforms, &self.white.view)
    }

    fn make_mesh(&mut self, d: &MeshDesc) -> GpuPrimitive {
        let mesh = self.mesh(&d.mesh);
        let model = d.transform.matrix();
        let lin = scene::srgb_to_linear;
        let (kind, uniforms, texture) = match &d.material {
            Material::Standard(m) => {
                let mut u = ObjectUniforms::new(model, lin(m.color), m.opacity);
                u.emissive = lin(m.emissive).extend(m.emissive_intensity).to_array();
                let has_map = if m.gradient_map.is_some() { 1.0 } else { 0.0 };
                u.params = [m.metalness, m.roughness, has_map, 0.0];
                let texture = match m.gradient_map {
                    Some(tint) => self.gradient(tint),
                    None => self.white.clone(),
                };
                (DrawKind::Standard, u, texture)
            }
            Material::Glow { color, opacity } => (
                DrawKind::Glow,
                ObjectUniforms::new(model, lin(*color), *opacity),
                self.white.clone(),
            ),
            Material::Gradient {
                start,
                end,
                bloom,
                opacity,
            } => {
                let mut u = ObjectUniforms::new(model, lin(*start), *opacity);
                u.aux = lin(*end).extend(*bloom).to_array();
                (DrawKind::Beam, u, self.white.clone())
            }
        };
        self.primitive(kind, Geometry::Mesh(mesh), d.visible, uniforms, &texture.view)
    }

    fn make_sprite(&mut self, d: &SpriteDesc) -> Result<GpuPrimitive, RenderError> {
        let texture = self.label(&d.text, d.color)?;
        let model = Mat4::from_scale_rotation_translation(
            Vec3::new(d.scale.x, d.scale.y, 1.0),
            Quat::IDENTITY,
            d.position,
        );
        let uniforms = ObjectUniforms::new(model, Vec3::ONE, d.opacity);
        Ok(self.primitive(
            DrawKind::Sprite,
            Geometry::Quad,
            d.visible,
            uniforms,
            &texture.view,
        ))
    }

    fn update(
        &mut self,
        handle: PrimitiveHandle,
        f: impl FnOnce(&mut GpuPrimitive) -> Result<(), RenderError>,
    ) -> Result<(), RenderError> {
        let prim = self
            .primitives
            .get_mut(&handle)
            .ok_or(RenderError::UnknownPrimitive(handle))?;
        f(prim)?;
        self.queue
            .write_buffer(&prim.uniform_buffer, 0, bytemuck::bytes_of(&prim.uniforms));
        Ok(())
    }

    fn write_post_uniforms(&self) {
        let (bw, bh) = targets::bloom_size(self.width, self.height);
        for pass in PostPass::ALL {
            let uniforms = PostUniforms {
                resolution: [bw as f32, bh as f32],
                blur_dir: pass.blur_dir(),
                bloom_strength: self.bloom_strength,
                threshold: BLOOM_THRESHOLD,
                exposure: TONE_MAPPING_EXPOSURE,
                radius: BLOOM_RADIUS,
            };
            self.queue.write_buffer(
                self.post.uniform_buffer(pass),
                0,
                bytemuck::bytes_of(&uniforms),
            );
        }
    }

    pub fn render(&mut self, camera: &OrbitCamera) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::new(camera)),
        );
        self.write_post_uniforms();
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);
            for kind in DrawKind::ORDER {
                let mut batch = self
                    .primitives
                    .values()
                    .filter(|p| p.visible && p.kind == kind)
                    .peekable();
                if batch.peek().is_none() {
                    continue;
                }
                rpass.set_pipeline(self.scene.get(kind));
                for prim in batch {
                    rpass.set_bind_group(1, &prim.bind_group, &[]);
                    match &prim.geometry {
                        Geometry::Mesh(mesh) => {
                            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                            rpass.set_index_buffer(
                                mesh.index_buffer.slice(..),
                                wgpu::IndexFormat::Uint32,
                            );
                            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                        }
                        Geometry::Lines {
                            buffer: Some(buffer),
                            vertex_count,
                        } => {
                            rpass.set_vertex_buffer(0, buffer.slice(..));
                            rpass.draw(0..*vertex_count, 0..1);
                        }
                        Geometry::Stars {
                            buffer: Some(buffer),
                            instance_count,
                        } => {
                            rpass.set_vertex_buffer(0, buffer.slice(..));
                            rpass.draw(0..6, 0..*instance_count);
                        }
                        Geometry::Quad => rpass.draw(0..6, 0..1),
                        Geometry::Lines { buffer: None, .. } | Geometry::Stars { buffer: None, .. } => {}
                    }
                }
            }
        }

        // Bright pass: hdr -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.from_hdr,
            None,
        );
        // Blur horizontal: bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_a,
            None,
        );
        // Blur vertical: bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_b,
            None,
        );
        // Composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.composite_scene,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl<'a> RenderBackend for GpuState<'a> {
    fn add(&mut self, desc: PrimitiveDesc) -> Result<PrimitiveHandle, RenderError> {
        let prim = match &desc {
            PrimitiveDesc::Points(d) => self.make_stars(d),
            PrimitiveDesc::Lines(d) => self.make_lines(d),
            PrimitiveDesc::Mesh(d) => self.make_mesh(d),
            PrimitiveDesc::Sprite(d) => self.make_sprite(d)?,
        };
        let handle = PrimitiveHandle(self.next_handle);
        self.next_handle += 1;
        self.primitives.insert(handle, prim);
        Ok(handle)
    }

    fn dispose(&mut self, handle: PrimitiveHandle) {
        if self.primitives.remove(&handle).is_none() {
            log::debug!("[gpu] dispose of unknown primitive {handle}");
        }
    }

    fn set_visible(&mut self, handle: PrimitiveHandle, visible: bool) -> Result<(), RenderError> {
        let prim = self
            .primitives
            .get_mut(&handle)
            .ok_or(RenderError::UnknownPrimitive(handle))?;
        prim.visible = visible;
        Ok(())
    }

    fn set_opacity(&mut self, handle: PrimitiveHandle, opacity: f32) -> Result<(), RenderError> {
        self.update(handle, |prim| {
            prim.uniforms.color[3] = opacity;
            Ok(())
        })
    }

    fn set_emissive_intensity(
        &mut self,
        handle: PrimitiveHandle,
        intensity: f32,
    ) -> Result<(), RenderError> {
        self.update(handle, |prim| {
            if prim.kind != DrawKind::Standard {
                return Err(RenderError::MissingProperty {
                    handle,
                    property: "emissive intensity",
                });
            }
            prim.uniforms.emissive[3] = intensity;
            Ok(())
        })
    }

    fn set_beam_bloom(&mut self, handle: PrimitiveHandle, bloom: f32) -> Result<(), RenderError> {
        self.update(handle, |prim| {
            if prim.kind != DrawKind::Beam {
                return Err(RenderError::MissingProperty {
                    handle,
                    property: "beam bloom",
                });
            }
            prim.uniforms.aux[3] = bloom;
            Ok(())
        })
    }

    fn set_bloom_strength(&mut self, strength: f32) {
        self.bloom_strength = strength;
    }
}
