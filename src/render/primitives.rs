use wgpu::Color;

use super::{Renderer, vertex::Vertex};

/// Filled axis-aligned rectangle, anchored at its top-left corner.
///
/// Submitted to the renderer when dropped.
pub struct RectangleBuilder<'a> {
    renderer: &'a mut Renderer,
    position: [f32; 2],
    size: [f32; 2],
    color: Color,
}

impl<'a> RectangleBuilder<'a> {
    pub(crate) fn new(renderer: &'a mut Renderer) -> Self {
        Self {
            renderer,
            position: [0.0, 0.0],
            size: [64.0, 64.0],
            color: Color::WHITE,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = [w, h];
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Drop for RectangleBuilder<'_> {
    fn drop(&mut self) {
        let [x, y] = self.position;
        let [w, h] = self.size;
        let (left, top, right, bottom) = (x, y, x + w, y + h);

        // uv (0,0) samples the default white texel
        let uv = [0.0, 0.0];
        let vertices = [
            Vertex::new(self.renderer.to_ndc(left, top), self.color, uv),
            Vertex::new(self.renderer.to_ndc(right, top), self.color, uv),
            Vertex::new(self.renderer.to_ndc(right, bottom), self.color, uv),
            Vertex::new(self.renderer.to_ndc(left, bottom), self.color, uv),
        ];

        self.renderer.submit(&vertices, &[0, 1, 2, 2, 3, 0]);
    }
}
