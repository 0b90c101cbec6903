use std::num::NonZeroU64;

use crate::frame::{FrameResource, GuiData, GuiVertex};
use crate::gpu::{CommandRecorder, PipelineKind, RecordedCommand, UploadBuffer};
use crate::render::{RenderCtx, RenderTarget};
use crate::text::GridAtlas;

/// GPU copies of one frame resource's buffers.
struct SlotBuffers {
    gui_vbo: wgpu::Buffer,
    text_vbo: wgpu::Buffer,
    gui_data: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    scene: SceneBuffers,
}

/// Scene-side storage buffers of one frame slot: pass constants, one instance
/// buffer per render item, and materials.
pub struct SceneBuffers {
    pub pass_constants: wgpu::Buffer,
    pub instances: Vec<wgpu::Buffer>,
    pub materials: wgpu::Buffer,
}

impl SceneBuffers {
    fn new(ctx: &RenderCtx<'_>, frame: &FrameResource) -> Self {
        let storage = wgpu::BufferUsages::STORAGE;
        Self {
            pass_constants: create_streamed(ctx, "prism pass constants", &frame.pass_constants, storage),
            instances: frame
                .instances
                .iter()
                .map(|buf| create_streamed(ctx, "prism instance data", buf, storage))
                .collect(),
            materials: create_streamed(ctx, "prism material data", &frame.materials, storage),
        }
    }

    fn upload(&self, ctx: &RenderCtx<'_>, frame: &mut FrameResource) {
        upload_if_dirty(ctx, &self.pass_constants, &mut frame.pass_constants);
        for (gpu, mirror) in self.instances.iter().zip(frame.instances.iter_mut()) {
            upload_if_dirty(ctx, gpu, mirror);
        }
        upload_if_dirty(ctx, &self.materials, &mut frame.materials);
    }
}

/// Index data shared by every frame slot, uploaded when replaced.
#[derive(Default)]
struct SharedIndices {
    cpu: Vec<u16>,
    gpu: Option<wgpu::Buffer>,
    stale: bool,
}

impl SharedIndices {
    fn replace(&mut self, indices: &[u16]) {
        self.cpu.clear();
        self.cpu.extend_from_slice(indices);
        // write_buffer needs a 4-byte multiple.
        if self.cpu.len() % 2 == 1 {
            self.cpu.push(0);
        }
        self.stale = true;
    }

    fn upload(&mut self, ctx: &RenderCtx<'_>, label: &'static str) {
        if !self.stale || self.cpu.is_empty() {
            return;
        }
        let size = (self.cpu.len() * std::mem::size_of::<u16>()) as u64;
        let fits = self.gpu.as_ref().is_some_and(|b| b.size() >= size);
        if !fits {
            self.gpu = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }
        if let Some(buf) = self.gpu.as_ref() {
            ctx.queue.write_buffer(buf, 0, bytemuck::cast_slice(&self.cpu));
        }
        self.stale = false;
    }
}

/// Draws widget quads and glyph quads streamed through the frame ring.
///
/// One set of GPU buffers exists per frame slot so the CPU never writes a
/// buffer the GPU may still be reading. Widget color comes from the slot's
/// `gui_data` storage buffer indexed by `first_instance`. The slot's scene
/// buffers are uploaded alongside and exposed through
/// [`scene_buffers`](Self::scene_buffers) for passes that read them.
pub struct OverlayRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    gui_pipeline: Option<wgpu::RenderPipeline>,
    text_pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    atlas: GridAtlas,
    atlas_view: Option<wgpu::TextureView>,

    slots: Vec<Option<SlotBuffers>>,

    gui_indices: SharedIndices,
    text_indices: SharedIndices,
}

impl OverlayRenderer {
    pub fn new(atlas: GridAtlas) -> Self {
        Self {
            pipeline_format: None,
            gui_pipeline: None,
            text_pipeline: None,
            bind_group_layout: None,
            sampler: None,
            atlas,
            atlas_view: None,
            slots: Vec::new(),
            gui_indices: SharedIndices::default(),
            text_indices: SharedIndices::default(),
        }
    }

    /// Replaces the widget index buffer (from the geometry aggregate).
    pub fn set_gui_indices(&mut self, indices: &[u16]) {
        self.gui_indices.replace(indices);
    }

    /// Replaces the glyph index pool.
    pub fn set_text_indices(&mut self, indices: &[u16]) {
        self.text_indices.replace(indices);
    }

    /// GPU scene buffers of `slot`, once the slot has been rendered.
    pub fn scene_buffers(&self, slot: usize) -> Option<&SceneBuffers> {
        self.slots.get(slot)?.as_ref().map(|b| &b.scene)
    }

    /// Uploads `frame`'s dirty buffers into slot `slot` and replays `commands`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        slot: usize,
        frame: &mut FrameResource,
        commands: &CommandRecorder,
    ) {
        self.ensure_pipelines(ctx);
        self.ensure_atlas(ctx);
        self.ensure_sampler(ctx);
        self.ensure_slot(ctx, slot, frame);

        self.gui_indices.upload(ctx, "prism gui ibo");
        self.text_indices.upload(ctx, "prism text ibo");

        let Some(Some(buffers)) = self.slots.get(slot) else { return };
        upload_if_dirty(ctx, &buffers.gui_vbo, &mut frame.gui_vertices);
        upload_if_dirty(ctx, &buffers.text_vbo, &mut frame.text_vertices);
        upload_if_dirty(ctx, &buffers.gui_data, &mut frame.gui_data);
        buffers.scene.upload(ctx, frame);

        if commands.is_empty() {
            return;
        }

        let Some(gui_pipeline) = self.gui_pipeline.as_ref() else { return };
        let Some(text_pipeline) = self.text_pipeline.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism overlay pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, &buffers.bind_group, &[]);

        let mut bound = false;
        for cmd in commands.commands() {
            match *cmd {
                RecordedCommand::SetPipeline(kind) => {
                    let (pipeline, vbo, ibo) = match kind {
                        PipelineKind::Gui => (gui_pipeline, &buffers.gui_vbo, self.gui_indices.gpu.as_ref()),
                        PipelineKind::Text => (text_pipeline, &buffers.text_vbo, self.text_indices.gpu.as_ref()),
                    };
                    let Some(ibo) = ibo else {
                        log::warn!("overlay: no index buffer for {kind:?}; draws skipped");
                        bound = false;
                        continue;
                    };
                    rpass.set_pipeline(pipeline);
                    rpass.set_vertex_buffer(0, vbo.slice(..));
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
                    bound = true;
                }
                RecordedCommand::Draw(d) => {
                    if !bound || d.instance_count == 0 || d.index_count == 0 {
                        continue;
                    }
                    rpass.draw_indexed(
                        d.start_index..d.start_index + d.index_count,
                        d.base_vertex,
                        d.first_instance..d.first_instance + d.instance_count,
                    );
                }
            }
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.gui_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism overlay shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism overlay bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(std::mem::size_of::<GuiData>() as u64),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
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

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism overlay pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let make = |label: &'static str, vs: &'static str, fs: &'static str| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Glyph quads wind the other way.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.gui_pipeline = Some(make("prism gui pipeline", "vs_gui", "fs_gui"));
        self.text_pipeline = Some(make("prism text pipeline", "vs_text", "fs_text"));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bgl);

        // Bind groups reference the old layout.
        self.slots.clear();
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_view.is_some() {
            return;
        }

        let size = wgpu::Extent3d {
            width: self.atlas.width().max(1),
            height: self.atlas.height().max(1),
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism glyph atlas"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        if !self.atlas.pixels().is_empty() {
            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                self.atlas.pixels(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.atlas.width()),
                    rows_per_image: Some(self.atlas.height()),
                },
                size,
            );
        }

        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.slots.clear();
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("prism atlas sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_slot(&mut self, ctx: &RenderCtx<'_>, slot: usize, frame: &mut FrameResource) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        if self.slots[slot].is_some() {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(atlas_view) = self.atlas_view.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let gui_vbo = create_streamed(ctx, "prism gui vbo", &frame.gui_vertices, wgpu::BufferUsages::VERTEX);
        let text_vbo = create_streamed(ctx, "prism text vbo", &frame.text_vertices, wgpu::BufferUsages::VERTEX);
        let gui_data = create_streamed(ctx, "prism gui data", &frame.gui_data, wgpu::BufferUsages::STORAGE);
        let scene = SceneBuffers::new(ctx, frame);

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism overlay bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: gui_data.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        // Fresh GPU buffers are empty; force a full upload.
        frame.gui_vertices.mark_dirty();
        frame.text_vertices.mark_dirty();
        frame.gui_data.mark_dirty();
        frame.pass_constants.mark_dirty();
        frame.materials.mark_dirty();
        for buf in &mut frame.instances {
            buf.mark_dirty();
        }

        log::debug!("overlay: allocated GPU buffers for frame slot {slot}");
        self.slots[slot] = Some(SlotBuffers {
            gui_vbo,
            text_vbo,
            gui_data,
            bind_group,
            scene,
        });
    }
}

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GuiVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

fn create_streamed<T: bytemuck::Pod>(
    ctx: &RenderCtx<'_>,
    label: &'static str,
    mirror: &UploadBuffer<T>,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: mirror.byte_len().max(16) as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Full re-upload of a dirty mirror.
fn upload_if_dirty<T: bytemuck::Pod>(ctx: &RenderCtx<'_>, gpu: &wgpu::Buffer, mirror: &mut UploadBuffer<T>) {
    if !mirror.take_dirty() || mirror.byte_len() == 0 {
        return;
    }
    ctx.queue.write_buffer(gpu, 0, mirror.as_bytes());
}
