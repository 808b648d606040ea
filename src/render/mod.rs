mod primitives;
mod renderer;
mod text;
mod texture;
mod vertex;

pub use primitives::RectangleBuilder;
pub use renderer::Renderer;
pub use text::TextBuilder;
pub use wgpu::Color;

/// Per-frame drawing interface handed to the frame callback
pub struct Graphics<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> Graphics<'a> {
    pub(crate) fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    /// Fill the background before anything else is drawn
    pub fn clear(&mut self, color: Color) {
        self.renderer.set_clear_color(color);
    }

    /// Fixed logical canvas size in pixels
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.renderer.logical_width(),
            self.renderer.logical_height(),
        )
    }

    /// Start building a filled rectangle
    pub fn rect(&mut self) -> RectangleBuilder<'_> {
        RectangleBuilder::new(self.renderer)
    }

    /// Start building a block of text
    pub fn text<'t>(&'t mut self, text: &'t str) -> TextBuilder<'t> {
        TextBuilder::new(self.renderer.text_mut(), text)
    }
}
