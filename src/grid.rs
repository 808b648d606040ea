use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::render::Color;

/// Label color, flipped between black & white
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn toggle(self) -> Self {
        match self {
            TextColor::Black => TextColor::White,
            TextColor::White => TextColor::Black,
        }
    }

    pub fn color(self) -> Color {
        match self {
            TextColor::Black => Color::BLACK,
            TextColor::White => Color::WHITE,
        }
    }
}

/// One colored cell, labeled with its own channel values
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    x: u32,
    y: u32,
    rgb: [u8; 3],
}

impl Tile {
    fn new(x: u32, y: u32, rgb: [u8; 3]) -> Self {
        Self { x, y, rgb }
    }

    pub fn grid_pos(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Top-left pixel offset of this tile on the logical canvas
    pub fn origin(&self, cell_size: u32) -> (f32, f32) {
        ((self.x * cell_size) as f32, (self.y * cell_size) as f32)
    }

    pub fn rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.rgb;
        [r, g, b, 255]
    }

    pub fn color(&self) -> Color {
        let [r, g, b] = self.rgb;
        Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Three-line decimal label: R, G, B
    pub fn label(&self) -> String {
        let [r, g, b] = self.rgb;
        format!("{r}\n{g}\n{b}")
    }
}

/// Owns the tile set, the label color & the regenerate flag.
///
/// Starts with the flag set so the first frame populates the grid;
/// `regenerate_if_pending` runs the swap & clears it.
pub struct TileGrid {
    width: u32,
    height: u32,
    cell_size: u32,
    tiles: Vec<Tile>,
    text_color: TextColor,
    label_color: TextColor,
    pending: bool,
    rng: StdRng,
}

impl TileGrid {
    /// Grid with the RNG seeded from the system clock
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Self::with_seed(width, height, cell_size, seed)
    }

    pub fn with_seed(width: u32, height: u32, cell_size: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            cell_size,
            tiles: Vec::new(),
            text_color: TextColor::Black,
            label_color: TextColor::Black,
            pending: true,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Fixed logical canvas size, independent of the window's actual size
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.cell_size * self.width, self.cell_size * self.height)
    }

    /// Current label color, applied at the next regeneration
    pub fn text_color(&self) -> TextColor {
        self.text_color
    }

    /// Color the on-screen labels were created with
    pub fn label_color(&self) -> TextColor {
        self.label_color
    }

    pub fn toggle_text_color(&mut self) {
        self.text_color = self.text_color.toggle();
    }

    pub fn request_regenerate(&mut self) {
        self.pending = true;
    }

    /// Runs a pending regeneration & clears the flag; true if the grid changed
    pub fn regenerate_if_pending(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.regenerate();
        true
    }

    fn regenerate(&mut self) {
        let mut tiles = Vec::with_capacity((self.width * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                // upper bound exclusive, channels land in [0, 255)
                let rgb = [
                    self.rng.gen_range(0..255),
                    self.rng.gen_range(0..255),
                    self.rng.gen_range(0..255),
                ];
                tiles.push(Tile::new(x, y, rgb));
            }
        }
        self.tiles = tiles;
        self.label_color = self.text_color;
        log::debug!("regenerated {} tiles", self.tiles.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_regeneration_populates_full_grid() {
        let mut grid = TileGrid::with_seed(5, 5, 100, 1);
        assert!(grid.tiles().is_empty());

        // flag starts set, so the first pass fills the grid
        assert!(grid.regenerate_if_pending());
        assert_eq!(grid.tiles().len(), 25);

        // no new request, nothing to do
        assert!(!grid.regenerate_if_pending());
    }

    #[test]
    fn channels_in_range_alpha_opaque() {
        let mut grid = TileGrid::with_seed(5, 5, 100, 2);
        grid.regenerate_if_pending();
        for tile in grid.tiles() {
            let [r, g, b, a] = tile.rgba();
            assert!(r < 255 && g < 255 && b < 255);
            assert_eq!(a, 255);
        }
    }

    #[test]
    fn tiles_are_row_major() {
        let mut grid = TileGrid::with_seed(3, 2, 10, 3);
        grid.regenerate_if_pending();
        for (i, tile) in grid.tiles().iter().enumerate() {
            let i = i as u32;
            assert_eq!(tile.grid_pos(), (i % 3, i / 3));
        }
    }

    #[test]
    fn label_round_trips_to_own_color() {
        let mut grid = TileGrid::with_seed(5, 5, 100, 4);
        grid.regenerate_if_pending();
        for tile in grid.tiles() {
            let parsed: Vec<u8> = tile
                .label()
                .lines()
                .map(|l| l.parse().expect("numeric label line"))
                .collect();
            let [r, g, b, _] = tile.rgba();
            assert_eq!(parsed, vec![r, g, b]);
        }
    }

    #[test]
    fn tile_origin_is_scaled_grid_pos() {
        let tile = Tile::new(3, 4, [0, 0, 0]);
        assert_eq!(tile.origin(100), (300.0, 400.0));
    }

    #[test]
    fn text_color_toggle_is_involution() {
        assert_eq!(TextColor::Black.toggle(), TextColor::White);
        assert_eq!(TextColor::Black.toggle().toggle(), TextColor::Black);
    }

    #[test]
    fn toggle_applies_to_labels_at_next_regeneration() {
        let mut grid = TileGrid::with_seed(2, 2, 50, 5);
        grid.regenerate_if_pending();
        assert_eq!(grid.label_color(), TextColor::Black);

        // toggling flips the session color immediately, but labels keep the
        // color they were created with until the next regeneration
        grid.toggle_text_color();
        assert_eq!(grid.text_color(), TextColor::White);
        assert_eq!(grid.label_color(), TextColor::Black);

        grid.request_regenerate();
        grid.regenerate_if_pending();
        assert_eq!(grid.label_color(), TextColor::White);
    }

    #[test]
    fn regeneration_replaces_colors() {
        let mut grid = TileGrid::with_seed(5, 5, 100, 6);
        grid.regenerate_if_pending();
        let before: Vec<[u8; 4]> = grid.tiles().iter().map(Tile::rgba).collect();

        grid.request_regenerate();
        grid.regenerate_if_pending();
        let after: Vec<[u8; 4]> = grid.tiles().iter().map(Tile::rgba).collect();

        assert_eq!(grid.tiles().len(), 25);
        assert_ne!(before, after);
    }

    #[test]
    fn layout_reports_fixed_canvas() {
        let grid = TileGrid::with_seed(5, 5, 100, 7);
        assert_eq!(grid.pixel_size(), (500, 500));
    }
}
