use std::sync::Arc;

use wgpu::{
    Buffer, BufferDescriptor, BufferUsages, Color, Device, DeviceDescriptor, FragmentState,
    IndexFormat, Instance, Limits, LoadOp, Operations, PipelineLayoutDescriptor, PresentMode,
    Queue, RenderPassColorAttachment, RenderPassDescriptor, RenderPipeline,
    RenderPipelineDescriptor, RequestAdapterOptions, StoreOp, Surface, SurfaceConfiguration,
    VertexState, include_wgsl,
};
use winit::{event_loop::EventLoopProxy, window::Window};

use super::{text::TextPass, texture::Texture, vertex::Vertex};

const MAX_VERTICES: usize = 43_690;
const MAX_INDICES: usize = u16::MAX as usize;

struct RenderBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
}

impl RenderBatch {
    fn new(device: &Device) -> Self {
        let vertex_buffer = device.create_buffer(&BufferDescriptor {
            label: None,
            size: (MAX_VERTICES * size_of::<Vertex>()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&BufferDescriptor {
            label: None,
            size: (MAX_INDICES * size_of::<u16>()) as u64,
            usage: BufferUsages::INDEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            vertex_buffer,
            index_buffer,
        }
    }

    fn submit(&mut self, vertices: &[Vertex], indices: &[u16]) {
        let idx = self.vertices.len() as u16;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.iter().map(|i| i + idx));
    }

    fn upload(&self, queue: &Queue) {
        assert!(
            self.vertices.len() <= MAX_VERTICES,
            "Vertex buffer overflow"
        );
        assert!(self.indices.len() <= MAX_INDICES, "Index buffer overflow");

        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
        let mut data = bytemuck::cast_slice(&self.indices).to_vec();
        data.resize((data.len() + 3) & !3, 0); // force align to 4 bytes
        queue.write_buffer(&self.index_buffer, 0, &data);
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

struct RenderTarget {
    surface: Surface<'static>,
    config: SurfaceConfiguration,
}

struct Gpu {
    device: Device,
    queue: Queue,
}

/// Owns the surface, pipeline & per-frame batches. Geometry coordinates are
/// logical canvas pixels; the canvas size is fixed at creation & the content
/// stretches with the window.
pub struct Renderer {
    gpu: Gpu,
    target: RenderTarget,
    pipeline: RenderPipeline,
    batch: RenderBatch,
    clear_color: Color,
    default_texture: Texture,
    text: TextPass,
    logical: (u32, u32),
}

impl Renderer {
    pub async fn create_graphics(
        window: Arc<Window>,
        logical: (u32, u32),
        proxy: EventLoopProxy<Self>,
    ) {
        let instance = Instance::default();
        let surface = instance.create_surface(window.clone()).unwrap();
        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                // Force find adapter that can present to this surface
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .unwrap();
        log::debug!("adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                required_limits: Limits::default(),
                ..Default::default()
            })
            .await
            .unwrap();

        let size = window.inner_size();
        let (w, h) = (size.width.max(1), size.height.max(1));

        let mut surface_cfg = surface.get_default_config(&adapter, w, h).unwrap();
        surface_cfg.present_mode = PresentMode::Fifo;
        surface.configure(&device, &surface_cfg);

        let shader = device.create_shader_module(include_wgsl!("../../shader.wgsl"));
        let bind_group_layout = Texture::create_bind_group_layout(&device);
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: None,
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            primitive: Default::default(),
            depth_stencil: None,
            multisample: Default::default(),
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(surface_cfg.format.into())],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        let default_texture = Texture::create_default(&device, &queue, &bind_group_layout);
        let text = TextPass::new(&device, &queue, surface_cfg.format);

        let _ = proxy.send_event(Renderer {
            batch: RenderBatch::new(&device),
            gpu: Gpu { device, queue },
            target: RenderTarget {
                surface,
                config: surface_cfg,
            },
            pipeline,
            clear_color: Color::BLACK,
            default_texture,
            text,
            logical,
        });
    }

    pub fn render_frame(&mut self) {
        let (lw, lh) = self.logical;
        self.text.prepare(&self.gpu.device, &self.gpu.queue, lw, lh);

        let frame = self.target.surface.get_current_texture().unwrap();
        let view = frame.texture.create_view(&Default::default());
        let mut encoder = self.gpu.device.create_command_encoder(&Default::default());
        {
            let mut r_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            if !self.batch.vertices.is_empty() {
                r_pass.set_pipeline(&self.pipeline);
                self.default_texture.bind(&mut r_pass, 0);

                self.batch.upload(&self.gpu.queue);
                r_pass.set_vertex_buffer(0, self.batch.vertex_buffer.slice(..));
                r_pass.set_index_buffer(self.batch.index_buffer.slice(..), IndexFormat::Uint16);
                r_pass.draw_indexed(0..self.batch.index_count(), 0, 0..1);
            }

            self.text.render(&mut r_pass);
        }

        self.gpu.queue.submit(Some(encoder.finish()));
        frame.present();

        self.batch.clear();
        self.text.end_frame();
    }

    /// Reconfigures the surface; the logical canvas size never changes
    pub fn resize(&mut self, w: u32, h: u32) {
        (self.target.config.width, self.target.config.height) = (w.max(1), h.max(1));
        self.target
            .surface
            .configure(&self.gpu.device, &self.target.config);
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn logical_width(&self) -> f32 {
        self.logical.0 as f32
    }

    pub fn logical_height(&self) -> f32 {
        self.logical.1 as f32
    }

    pub(crate) fn to_ndc(&self, x: f32, y: f32) -> [f32; 2] {
        let (w, h) = (self.logical_width(), self.logical_height());
        [(x / w) * 2.0 - 1.0, 1.0 - (y / h) * 2.0]
    }

    pub(crate) fn submit(&mut self, vertices: &[Vertex], indices: &[u16]) {
        self.batch.submit(vertices, indices);
    }

    pub(crate) fn text_mut(&mut self) -> &mut TextPass {
        &mut self.text
    }
}
