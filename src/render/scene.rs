use crate::game::{isometric_project, GameSession, Grid, Vec2};

/// Virtual pixels covered by one terminal cell horizontally
pub const CELL_WIDTH: f32 = 8.0;
/// Virtual pixels covered by one terminal cell vertically
pub const CELL_HEIGHT: f32 = 16.0;

/// The virtual pixel space the canvas is mapped onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport for a terminal of `columns` x `rows` cells
    pub fn from_terminal(columns: u16, rows: u16) -> Self {
        Self::new(columns as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
    }

    /// Offset that centres the projected grid in the viewport
    pub fn translate(&self, grid: Grid) -> Vec2 {
        Vec2::new(
            self.width * 0.5 - grid.tile_size * 0.5,
            self.height * 0.5 - grid.height() * 0.5,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Floor,
    Food,
    Segment,
}

/// A block to stamp, positioned by the top-left corner of its texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: BlockKind,
    pub origin: Vec2,
}

/// Everything drawn in one frame, back to front
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub sprites: Vec<Sprite>,
}

impl Scene {
    /// Lay out the floor, the food and the snake for the current frame
    pub fn compose(session: &GameSession, viewport: Viewport) -> Self {
        let grid = session.snake().grid();
        let translate = viewport.translate(grid);
        let place = |position: Vec2| isometric_project(position.x, position.y) + translate;

        let mut sprites = Vec::with_capacity(grid.cell_count() + session.snake().len() + 1);

        // Floor blocks sit one tile lower so the snake rests on top of them
        let floor_offset = Vec2::new(0.0, grid.tile_size);
        for row in 0..grid.rows as i32 {
            for column in 0..grid.columns as i32 {
                sprites.push(Sprite {
                    kind: BlockKind::Floor,
                    origin: place(grid.cell(column, row)) + floor_offset,
                });
            }
        }

        sprites.push(Sprite {
            kind: BlockKind::Food,
            origin: place(session.food()),
        });

        sprites.extend(session.snake().segments().map(|(_, segment)| Sprite {
            kind: BlockKind::Segment,
            origin: place(segment.current_position),
        }));

        Self { sprites }
    }

    pub fn count(&self, kind: BlockKind) -> usize {
        self.sprites.iter().filter(|sprite| sprite.kind == kind).count()
    }
}
