//! Isometric cube sprites.
//!
//! A block is built once per style at startup and then stamped at screen
//! positions every frame.

use ratatui::{
    style::Color,
    widgets::canvas::{Line, Painter, Shape},
};

use crate::game::Vec2;

/// Fill and outline colours of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStyle {
    pub border: Color,
    pub fill: Color,
}

impl BlockStyle {
    pub const FLOOR: Self = Self {
        border: Color::Rgb(0, 128, 50),
        fill: Color::Rgb(0, 153, 53),
    };

    pub const SEGMENT: Self = Self {
        border: Color::Rgb(200, 0, 0),
        fill: Color::Rgb(200, 0, 0),
    };

    pub const FOOD: Self = Self {
        border: Color::Rgb(200, 150, 0),
        fill: Color::Rgb(200, 150, 0),
    };
}

/// The three visible faces of a cube, inside a square of two tiles
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTexture {
    /// Top, left and right faces in texture space (y down)
    pub faces: [[Vec2; 4]; 3],
    pub style: BlockStyle,
    size: f32,
    /// Spacing of fill samples in pixels
    fill_step: f32,
}

impl BlockTexture {
    pub fn new(tile_size: f32, style: BlockStyle) -> Self {
        let t = tile_size;
        let half = t * 0.5;
        let center = Vec2::new(t, t);
        let face = |corners: [(f32, f32); 4]| corners.map(|(x, y)| center + Vec2::new(x, y));

        Self {
            faces: [
                face([(0.0, 0.0), (t, -half), (0.0, -t), (-t, -half)]),
                face([(0.0, 0.0), (0.0, t), (-t, half), (-t, -half)]),
                face([(0.0, 0.0), (t, -half), (t, half), (0.0, t)]),
            ],
            style,
            size: t * 2.0,
            fill_step: (tile_size / 4.0).max(1.0),
        }
    }

    /// Edge length of the square the block is drawn into
    pub fn size(&self) -> f32 {
        self.size
    }
}

/// A block texture placed on the canvas
pub struct IsoBlock<'a> {
    pub texture: &'a BlockTexture,
    /// Top-left corner of the texture in screen space (y down)
    pub origin: Vec2,
    /// Canvas height, used to flip into the canvas's y-up space
    pub view_height: f64,
}

impl IsoBlock<'_> {
    fn to_canvas(&self, point: Vec2) -> (f64, f64) {
        let screen = self.origin + point;
        (screen.x as f64, self.view_height - screen.y as f64)
    }

    fn fill_face(&self, face: &[Vec2; 4], painter: &mut Painter) {
        let step = self.texture.fill_step;
        let (min, max) = bounds(face);

        let mut y = min.y;
        while y <= max.y {
            let mut x = min.x;
            while x <= max.x {
                let point = Vec2::new(x, y);
                if contains(face, point) {
                    let (cx, cy) = self.to_canvas(point);
                    if let Some((px, py)) = painter.get_point(cx, cy) {
                        painter.paint(px, py, self.texture.style.fill);
                    }
                }
                x += step;
            }
            y += step;
        }
    }
}

impl Shape for IsoBlock<'_> {
    fn draw(&self, painter: &mut Painter) {
        for face in &self.texture.faces {
            self.fill_face(face, painter);
        }

        for face in &self.texture.faces {
            for (i, &start) in face.iter().enumerate() {
                let end = face[(i + 1) % face.len()];
                let (x1, y1) = self.to_canvas(start);
                let (x2, y2) = self.to_canvas(end);
                Line::new(x1, y1, x2, y2, self.texture.style.border).draw(painter);
            }
        }
    }
}

fn bounds(face: &[Vec2; 4]) -> (Vec2, Vec2) {
    face.iter().fold(
        (Vec2::new(f32::MAX, f32::MAX), Vec2::new(f32::MIN, f32::MIN)),
        |(min, max), p| {
            (
                Vec2::new(min.x.min(p.x), min.y.min(p.y)),
                Vec2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        },
    )
}

/// Point-in-convex-quad test, edges included
fn contains(face: &[Vec2; 4], point: Vec2) -> bool {
    let mut positive = false;
    let mut negative = false;

    for (i, &a) in face.iter().enumerate() {
        let b = face[(i + 1) % face.len()];
        let edge = b - a;
        let to_point = point - a;
        let cross = edge.x * to_point.y - edge.y * to_point.x;
        positive |= cross > 0.0;
        negative |= cross < 0.0;
    }

    !(positive && negative)
}
