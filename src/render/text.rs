use glyphon::{
    Attrs, Buffer, Cache, Color, FontSystem, Metrics, Resolution, Shaping, SwashCache, TextArea,
    TextAtlas, TextBounds, TextRenderer, Viewport,
};
use wgpu::{Device, MultisampleState, Queue, RenderPass, TextureFormat};

struct TextEntry {
    buffer: Buffer,
    position: (f32, f32),
    color: Color,
}

/// Collects text queued during a frame & draws it in one glyphon pass.
///
/// The viewport resolution is the logical canvas size, so text maps through
/// the same fixed coordinate space as the quad geometry & stretches with
/// the window.
pub struct TextPass {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    renderer: TextRenderer,
    entries: Vec<TextEntry>,
}

impl TextPass {
    pub fn new(device: &Device, queue: &Queue, format: TextureFormat) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let renderer = TextRenderer::new(&mut atlas, device, MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            renderer,
            entries: Vec::new(),
        }
    }

    fn queue(&mut self, text: &str, position: (f32, f32), size: f32, color: Color) {
        let mut buffer = Buffer::new(&mut self.font_system, Metrics::new(size, size + 2.0));
        let attrs = Attrs::new().color(color);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced);

        self.entries.push(TextEntry {
            buffer,
            position,
            color,
        });
    }

    pub fn prepare(&mut self, device: &Device, queue: &Queue, w: u32, h: u32) {
        self.viewport.update(
            queue,
            Resolution {
                width: w,
                height: h,
            },
        );

        let bounds = TextBounds {
            left: 0,
            top: 0,
            right: w as i32,
            bottom: h as i32,
        };
        let areas = self.entries.iter().map(|entry| TextArea {
            buffer: &entry.buffer,
            left: entry.position.0,
            top: entry.position.1,
            scale: 1.0,
            bounds,
            default_color: entry.color,
            custom_glyphs: &[],
        });

        self.renderer
            .prepare(
                device,
                queue,
                &mut self.font_system,
                &mut self.atlas,
                &self.viewport,
                areas,
                &mut self.swash_cache,
            )
            .unwrap();
    }

    pub fn render<'rp>(&'rp self, pass: &mut RenderPass<'rp>) {
        self.renderer
            .render(&self.atlas, &self.viewport, pass)
            .unwrap();
    }

    pub fn end_frame(&mut self) {
        self.entries.clear();
    }
}

/// Builder for one block of text, queued to the pass when dropped
pub struct TextBuilder<'a> {
    pass: &'a mut TextPass,
    text: &'a str,
    position: (f32, f32),
    size: f32,
    color: Color,
}

impl<'a> TextBuilder<'a> {
    pub(crate) fn new(pass: &'a mut TextPass, text: &'a str) -> Self {
        Self {
            pass,
            text,
            position: (0.0, 0.0),
            size: 16.0,
            color: Color::rgb(0, 0, 0),
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = (x, y);
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: wgpu::Color) -> Self {
        self.color = Color::rgba(
            (color.r * 255.0).round() as u8,
            (color.g * 255.0).round() as u8,
            (color.b * 255.0).round() as u8,
            (color.a * 255.0).round() as u8,
        );
        self
    }
}

impl Drop for TextBuilder<'_> {
    fn drop(&mut self) {
        self.pass
            .queue(self.text, self.position, self.size, self.color);
    }
}
