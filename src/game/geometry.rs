use rand::Rng;
use std::ops::{Add, Mul, Sub};

/// A point or offset in grid space, measured in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scale: f32) -> Vec2 {
        Vec2::new(self.x * scale, self.y * scale)
    }
}

/// Project a grid-space point onto the isometric screen plane
pub fn isometric_project(x: f32, y: f32) -> Vec2 {
    Vec2::new(x - y, (x + y) * 0.5)
}

/// The toroidal playfield: `columns` x `rows` tiles of `tile_size` pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
    pub tile_size: f32,
}

impl Grid {
    pub fn new(columns: usize, rows: usize, tile_size: f32) -> Self {
        Self {
            columns,
            rows,
            tile_size,
        }
    }

    /// Width of the playfield in pixels
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Height of the playfield in pixels
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Pixel position of the tile at `(column, row)`
    pub fn cell(&self, column: i32, row: i32) -> Vec2 {
        Vec2::new(
            column as f32 * self.tile_size,
            row as f32 * self.tile_size,
        )
    }

    /// Whether a point lies inside `[0, width) x [0, height)`
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x < self.width() && point.y >= 0.0 && point.y < self.height()
    }

    /// Pick a tile uniformly at random
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let column = rng.gen_range(0..self.columns) as i32;
        let row = rng.gen_range(0..self.rows) as i32;
        self.cell(column, row)
    }

    /// Carry a moving point across the grid edge it is leaving.
    ///
    /// Only the leading edge wraps: a point heading left wraps once it drops
    /// below zero, a point heading right wraps once its far side passes the
    /// extent. `next` moves by the same amount so the step in flight keeps
    /// its remaining distance.
    pub fn wrap(&self, current: &mut Vec2, next: &mut Vec2, direction: Vec2) {
        wrap_axis(
            &mut current.x,
            &mut next.x,
            direction.x,
            self.tile_size,
            self.width(),
        );
        wrap_axis(
            &mut current.y,
            &mut next.y,
            direction.y,
            self.tile_size,
            self.height(),
        );
    }

    /// Unit step from `from` toward the adjacent tile `to`.
    ///
    /// A gap of `extent - 1` tiles or more on an axis is read as a neighbour
    /// across the wrapped edge, so the step points the short way round.
    pub fn step_toward(&self, from: Vec2, to: Vec2) -> Vec2 {
        let delta = (to - from) * (1.0 / self.tile_size);
        Vec2::new(
            wrapped_unit(delta.x, self.columns as f32),
            wrapped_unit(delta.y, self.rows as f32),
        )
    }
}

fn wrap_axis(current: &mut f32, next: &mut f32, direction: f32, tile_size: f32, extent: f32) {
    if *current < 0.0 && direction < 0.0 {
        *current += extent;
        *next += extent;
    } else if *current + tile_size > extent && direction > 0.0 {
        *current -= extent;
        *next -= extent;
    }
}

fn wrapped_unit(delta: f32, extent: f32) -> f32 {
    let threshold = extent - 1.0;
    if delta >= threshold {
        -1.0
    } else if delta <= -threshold {
        1.0
    } else if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    }
}
