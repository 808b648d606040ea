use tilegrid::{
    app::{App, AppConfig},
    grid::TileGrid,
    input::KeyCode,
    render::Color,
};

const TILES_WIDE: u32 = 5;
const TILES_HIGH: u32 = 5;
const TILE_SIZE: u32 = 100;

fn main() {
    let mut grid = TileGrid::new(TILES_WIDE, TILES_HIGH, TILE_SIZE);
    let (width, height) = grid.pixel_size();

    App::new(AppConfig {
        title: "tilegrid".to_string(),
        width,
        height,
        resizable: true,
    })
    .run(move |ctx| {
        if ctx.input.key_pressed(KeyCode::KeyQ) {
            ctx.exit();
            return;
        }
        if ctx.input.key_pressed(KeyCode::KeyN) {
            grid.request_regenerate();
        }
        if ctx.input.key_pressed(KeyCode::KeyC) {
            grid.toggle_text_color();
        }

        grid.regenerate_if_pending();

        ctx.gfx.clear(Color::WHITE);

        let cell = grid.cell_size() as f32;
        let label_color = grid.label_color().color();
        for tile in grid.tiles() {
            let (x, y) = tile.origin(grid.cell_size());
            ctx.gfx.rect().at(x, y).size(cell, cell).color(tile.color());
            ctx.gfx
                .text(&tile.label())
                .at(x + 8.0, y + 6.0)
                .size(16.0)
                .color(label_color);
        }

        let overlay = format!(
            "(N) to change colors.\n(C) to change text color.\n(Q) to Quit.\nFPS: {}",
            ctx.timer.fps
        );
        ctx.gfx
            .text(&overlay)
            .at(2.0, 2.0)
            .size(14.0)
            .color(Color::BLACK);
    });
}
