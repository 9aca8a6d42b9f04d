use macroquad::prelude::*;
use macroquad_tiled_render::{
    AtlasTileset, MeshBatch, OrthogonalRenderer, RendererConfig, TextureId, TileCatalog, TileLayer,
    TileLayerRenderer, FLIP_D, FLIP_H, FLIP_V,
};

const TILE: u32 = 16;
const MAP_W: usize = 48;
const MAP_H: usize = 32;

fn window_conf() -> Conf {
    Conf {
        window_title: "Orthogonal Layer".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

/// 2x2 atlas of solid tiles, each with a white notch in its top-left corner
/// so mirroring and rotation are visible.
fn atlas_pixels() -> Vec<u8> {
    let size = (TILE * 2) as usize;
    let colors = [[200, 60, 60], [60, 200, 60], [60, 60, 200], [200, 200, 60]];
    let mut px = vec![0u8; size * size * 4];
    for y in 0..size {
        for x in 0..size {
            let tile = (y / TILE as usize) * 2 + x / TILE as usize;
            let (lx, ly) = (x % TILE as usize, y % TILE as usize);
            let rgb = if lx < 5 && ly < 3 { [255, 255, 255] } else { colors[tile] };
            let i = (y * size + x) * 4;
            px[i..i + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
    }
    px
}

fn build_layers(texture: TextureId) -> anyhow::Result<Vec<TileLayer>> {
    let catalog = TileCatalog::new(vec![AtlasTileset {
        first_gid: 1,
        tilecount: 4,
        cols: 2,
        texture,
        atlas_w: TILE * 2,
        atlas_h: TILE * 2,
        tile_w: TILE,
        tile_h: TILE,
        spacing: 0,
        margin: 0,
    }]);

    let flags = [0, FLIP_H, FLIP_V, FLIP_D, FLIP_H | FLIP_D];
    let ground: Vec<u32> = (0..MAP_W * MAP_H)
        .map(|i| ((i % 4) as u32 + 1) | flags[(i / 7) % flags.len()])
        .collect();
    let decor: Vec<u32> = (0..MAP_W * MAP_H)
        .map(|i| if i % 11 == 0 { 4 } else { 0 })
        .collect();

    Ok(vec![
        TileLayer::from_gids("ground", MAP_W, MAP_H, TILE as f32, TILE as f32, &ground, &catalog)?,
        TileLayer::from_gids("decor", MAP_W, MAP_H, TILE as f32, TILE as f32, &decor, &catalog)?
            .with_offset(4.0, 4.0)
            .with_opacity(0.6),
    ])
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let atlas = Texture2D::from_rgba8((TILE * 2) as u16, (TILE * 2) as u16, &atlas_pixels());
    atlas.set_filter(FilterMode::Nearest);

    let mut batch = MeshBatch::new();
    let texture = batch.add_texture(atlas);
    let layers = build_layers(texture).expect("Failed to build layers");

    let cfg = RendererConfig::from_json_str(r#"{ "unit_scale": 2.0 }"#).expect("Bad config");
    let renderer = OrthogonalRenderer::from_config(&cfg).expect("Bad renderer");

    let mut target = vec2(400.0, 300.0);

    loop {
        clear_background(BLACK);

        let speed = 400.0 * get_frame_time();
        if is_key_down(KeyCode::Left) {
            target.x -= speed;
        }
        if is_key_down(KeyCode::Right) {
            target.x += speed;
        }
        if is_key_down(KeyCode::Up) {
            target.y += speed;
        }
        if is_key_down(KeyCode::Down) {
            target.y -= speed;
        }

        // y-up camera, one world unit per pixel
        let size = vec2(screen_width(), screen_height());
        set_camera(&Camera2D {
            target,
            zoom: vec2(2.0 / size.x, 2.0 / size.y),
            ..Default::default()
        });

        let view = Rect::new(target.x - size.x / 2.0, target.y - size.y / 2.0, size.x, size.y);
        batch.reset_stats();
        renderer.render_layers(&layers, &view, &mut batch);

        if let Some(cell) = layers[0].cell(0, 0) {
            let half = TILE as f32 * renderer.unit_scale() / 2.0;
            renderer.render_cell_rotated(
                cell,
                target.x - half,
                target.y - half,
                &layers[0],
                get_time(),
                vec2(half, half),
                &mut batch,
            );
        }
        batch.flush();

        set_default_camera();
        draw_text(
            &format!("FPS: {}  draw calls: {}", get_fps(), batch.draw_calls()),
            20.0,
            30.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
}
