use ratatui::{
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Context},
    Frame,
};

use super::block::{BlockStyle, BlockTexture, IsoBlock};
use super::scene::{BlockKind, Scene, Sprite, Viewport};

/// Paints a [`Scene`] onto the terminal as isometric blocks
pub struct Renderer {
    floor: BlockTexture,
    segment: BlockTexture,
    food: BlockTexture,
}

impl Renderer {
    /// Build the block textures for tiles of `tile_size` pixels
    pub fn new(tile_size: f32) -> Self {
        Self {
            floor: BlockTexture::new(tile_size, BlockStyle::FLOOR),
            segment: BlockTexture::new(tile_size, BlockStyle::SEGMENT),
            food: BlockTexture::new(tile_size, BlockStyle::FOOD),
        }
    }

    pub fn render(&self, frame: &mut Frame, scene: &Scene, viewport: Viewport) {
        let canvas = Canvas::default()
            .background_color(Color::Black)
            .marker(Marker::Braille)
            .x_bounds([0.0, viewport.width as f64])
            .y_bounds([0.0, viewport.height as f64])
            .paint(|ctx| {
                let (floor, rest): (Vec<&Sprite>, Vec<&Sprite>) = scene
                    .sprites
                    .iter()
                    .partition(|sprite| sprite.kind == BlockKind::Floor);

                self.stamp(ctx, &floor, viewport);
                ctx.layer();
                self.stamp(ctx, &rest, viewport);
            });

        frame.render_widget(canvas, frame.area());
    }

    fn stamp(&self, ctx: &mut Context, sprites: &[&Sprite], viewport: Viewport) {
        for sprite in sprites {
            ctx.draw(&IsoBlock {
                texture: self.texture(sprite.kind),
                origin: sprite.origin,
                view_height: viewport.height as f64,
            });
        }
    }

    fn texture(&self, kind: BlockKind) -> &BlockTexture {
        match kind {
            BlockKind::Floor => &self.floor,
            BlockKind::Food => &self.food,
            BlockKind::Segment => &self.segment,
        }
    }
}
