//! The snake body and its movement model.
//!
//! The body is a doubly-linked chain of segments stored in a slot arena.
//! Only the head and the tail are simulated. Every completed step rotates the
//! tail segment to the front of the chain, so the interior segments never
//! move and a step costs the same for any snake length.

use slotmap::{new_key_type, SlotMap};

use super::geometry::{Grid, Vec2};

new_key_type! {
    /// Handle to a segment stored in a [`Snake`]
    pub struct SegmentKey;
}

/// Tile coordinates of the resting snake, head first
pub const INITIAL_LAYOUT: [(i32, i32); 4] = [(2, 0), (2, 0), (1, 0), (0, 0)];

/// One body unit of the snake
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Unit step of the move in progress, zero when at rest
    pub direction: Vec2,
    pub current_position: Vec2,
    /// Target of the move in progress
    pub next_position: Vec2,
    /// Where the move in progress started
    pub previous_position: Vec2,
    next: Option<SegmentKey>,
    previous: Option<SegmentKey>,
}

impl Segment {
    fn resting(position: Vec2) -> Self {
        Self {
            direction: Vec2::ZERO,
            current_position: position,
            next_position: position,
            previous_position: position,
            next: None,
            previous: None,
        }
    }

    /// Segment one step closer to the tail
    pub fn next(&self) -> Option<SegmentKey> {
        self.next
    }

    /// Segment one step closer to the head
    pub fn previous(&self) -> Option<SegmentKey> {
        self.previous
    }

    pub fn is_moving(&self) -> bool {
        !self.direction.is_zero()
    }

    fn begin_step(&mut self, direction: Vec2, tile_size: f32) {
        self.direction = direction;
        self.previous_position = self.current_position;
        self.next_position = self.current_position + direction * tile_size;
    }
}

/// Whether the snake is travelling between tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Stopped,
    Moving,
}

/// The snake: a segment chain plus its steering state
#[derive(Debug, Clone)]
pub struct Snake {
    segments: SlotMap<SegmentKey, Segment>,
    head: SegmentKey,
    tail: SegmentKey,
    motion: Motion,
    buffered_direction: Vec2,
    grid: Grid,
    velocity: f32,
}

impl Snake {
    /// Create the resting four-segment snake in the top corner of the grid
    pub fn new(grid: Grid, velocity: f32) -> Self {
        Self::from_cells(grid, velocity, &INITIAL_LAYOUT)
    }

    /// Create a resting snake from tile coordinates, head first.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn from_cells(grid: Grid, velocity: f32, cells: &[(i32, i32)]) -> Self {
        let (&(column, row), rest) = cells
            .split_first()
            .expect("a snake needs at least one segment");

        let mut segments = SlotMap::with_key();
        let head = segments.insert(Segment::resting(grid.cell(column, row)));

        let mut snake = Self {
            segments,
            head,
            tail: head,
            motion: Motion::Stopped,
            buffered_direction: Vec2::ZERO,
            grid,
            velocity,
        };

        for &(column, row) in rest {
            snake.grow(grid.cell(column, row));
        }

        snake
    }

    /// Steer the snake.
    ///
    /// A stopped snake starts its first step right away; a moving snake
    /// keeps the step in progress and turns at the next tile boundary.
    pub fn request_direction(&mut self, direction: impl Into<Vec2>) {
        self.buffered_direction = direction.into();

        if self.motion == Motion::Stopped {
            self.motion = Motion::Moving;
            self.commit_step();
        }
    }

    /// Start the next step for the head and the tail.
    ///
    /// The head follows the buffered direction. The tail heads for its
    /// predecessor's tile. A zero buffered direction stops the snake instead.
    pub fn commit_step(&mut self) {
        if self.buffered_direction.is_zero() {
            self.motion = Motion::Stopped;
            return;
        }

        let tile_size = self.grid.tile_size;
        let head_direction = self.buffered_direction;
        self.segments[self.head].begin_step(head_direction, tile_size);

        let tail_direction = self.tail_direction();
        self.segments[self.tail].begin_step(tail_direction, tile_size);
    }

    /// Advance the snake by one frame.
    ///
    /// When both ends have reached their targets the tail is recycled into
    /// the new head, `at_boundary` runs, and the next step is committed.
    /// Returns whether a step boundary was crossed.
    pub fn tick<F>(&mut self, delta_time: f32, at_boundary: F) -> bool
    where
        F: FnOnce(&mut Snake),
    {
        if self.motion == Motion::Stopped {
            return false;
        }

        self.advance_segment(self.head, delta_time);
        self.advance_segment(self.tail, delta_time);

        if self.segments[self.head].is_moving() || self.segments[self.tail].is_moving() {
            return false;
        }

        self.recycle_tail();
        at_boundary(self);
        self.commit_step();

        true
    }

    /// Move the tail segment to the front of the chain in O(1).
    ///
    /// The recycled segment lands on the head's tile and becomes the new
    /// head; the old tail's predecessor becomes the new tail. The recycled
    /// segment keeps `previous_position`, the tile the tail just vacated.
    pub fn recycle_tail(&mut self) {
        let recycled = self.tail;
        let Some(new_tail) = self.segments[recycled].previous else {
            return;
        };

        let old_head = self.head;
        let landing = self.segments[old_head].current_position;

        self.segments[new_tail].next = None;
        self.segments[old_head].previous = Some(recycled);

        let segment = &mut self.segments[recycled];
        segment.next = Some(old_head);
        segment.previous = None;
        segment.current_position = landing;
        segment.next_position = landing;

        self.head = recycled;
        self.tail = new_tail;
    }

    /// Append a resting segment at `position` as the new tail
    pub fn grow(&mut self, position: Vec2) -> SegmentKey {
        let mut segment = Segment::resting(position);
        segment.previous = Some(self.tail);

        let key = self.segments.insert(segment);
        self.segments[self.tail].next = Some(key);
        self.tail = key;
        key
    }

    fn advance_segment(&mut self, key: SegmentKey, delta_time: f32) {
        let travel = self.velocity * delta_time;
        let grid = self.grid;
        let segment = &mut self.segments[key];
        let direction = segment.direction;

        let remaining_x = (segment.next_position.x - segment.current_position.x).abs();
        let remaining_y = (segment.next_position.y - segment.current_position.y).abs();

        if remaining_x > travel {
            segment.current_position.x += segment.direction.x * travel;
        } else if remaining_y > travel {
            segment.current_position.y += segment.direction.y * travel;
        } else {
            segment.current_position = segment.next_position;
            segment.direction = Vec2::ZERO;
        }

        // A snap can land past the edge, so wrap with the step's direction
        grid.wrap(
            &mut segment.current_position,
            &mut segment.next_position,
            direction,
        );
    }

    fn tail_direction(&self) -> Vec2 {
        let tail = &self.segments[self.tail];
        match tail.previous {
            Some(key) => self
                .grid
                .step_toward(tail.current_position, self.segments[key].current_position),
            None => Vec2::ZERO,
        }
    }

    pub fn head(&self) -> &Segment {
        &self.segments[self.head]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.tail]
    }

    pub fn head_key(&self) -> SegmentKey {
        self.head
    }

    pub fn tail_key(&self) -> SegmentKey {
        self.tail
    }

    pub fn segment(&self, key: SegmentKey) -> Option<&Segment> {
        self.segments.get(key)
    }

    /// Walk the chain from head to tail
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            snake: self,
            cursor: Some(self.head),
        }
    }

    /// Number of segments in the chain
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a snake keeps at least one segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_moving(&self) -> bool {
        self.motion == Motion::Moving
    }

    pub fn buffered_direction(&self) -> Vec2 {
        self.buffered_direction
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }
}

/// Head-to-tail iterator over a snake's segments
pub struct Segments<'a> {
    snake: &'a Snake,
    cursor: Option<SegmentKey>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (SegmentKey, &'a Segment);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let segment = &self.snake.segments[key];
        self.cursor = segment.next;
        Some((key, segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    const FRAME: f32 = 0.02;

    fn grid() -> Grid {
        Grid::new(30, 30, 16.0)
    }

    fn resting_snake() -> Snake {
        Snake::new(grid(), 150.0)
    }

    /// Tick until a step completes, returning the number of frames it took
    fn run_step(snake: &mut Snake) -> usize {
        for frame in 1..=1000 {
            if snake.tick(FRAME, |_| {}) {
                return frame;
            }
        }
        panic!("step never completed");
    }

    fn assert_chain_consistent(snake: &Snake) {
        let forward: Vec<SegmentKey> = snake.segments().map(|(key, _)| key).collect();
        assert_eq!(forward.len(), snake.len());
        assert_eq!(forward.first(), Some(&snake.head_key()));
        assert_eq!(forward.last(), Some(&snake.tail_key()));

        let mut backward = Vec::new();
        let mut cursor = Some(snake.tail_key());
        while let Some(key) = cursor {
            backward.push(key);
            cursor = snake.segment(key).unwrap().previous();
        }
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_resting_snake() {
        let snake = resting_snake();

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.motion(), Motion::Stopped);
        assert_eq!(snake.head().current_position, grid().cell(2, 0));
        assert_eq!(snake.tail().current_position, grid().cell(0, 0));
        assert!(snake.segments().all(|(_, segment)| !segment.is_moving()));
        assert_chain_consistent(&snake);
    }

    #[test]
    fn test_zero_request_while_stopped() {
        let mut snake = resting_snake();
        let before: Vec<Segment> = snake.segments().map(|(_, s)| s.clone()).collect();

        snake.request_direction(Vec2::ZERO);

        assert_eq!(snake.motion(), Motion::Stopped);
        let after: Vec<Segment> = snake.segments().map(|(_, s)| s.clone()).collect();
        assert_eq!(before, after);
        assert!(!snake.tick(FRAME, |_| {}));
    }

    #[test]
    fn test_request_commits_immediately() {
        let mut snake = resting_snake();

        snake.request_direction(Direction::Down);

        assert!(snake.is_moving());
        let head = snake.head();
        assert_eq!(head.direction, Vec2::new(0.0, 1.0));
        assert_eq!(head.previous_position, head.current_position);
        assert_eq!(
            head.next_position,
            head.current_position + Vec2::new(0.0, 16.0)
        );

        // The tail heads for its predecessor at (1, 0)
        let tail = snake.tail();
        assert_eq!(tail.direction, Vec2::new(1.0, 0.0));
        assert_eq!(tail.next_position, grid().cell(1, 0));
    }

    #[test]
    fn test_buffered_direction_waits_for_boundary() {
        let mut snake = resting_snake();
        snake.request_direction(Direction::Right);
        snake.tick(FRAME, |_| {});

        snake.request_direction(Direction::Down);

        assert_eq!(snake.head().direction, Vec2::new(1.0, 0.0));
        assert_eq!(snake.head().next_position, grid().cell(3, 0));
        assert_eq!(snake.buffered_direction(), Vec2::new(0.0, 1.0));

        run_step(&mut snake);

        assert_eq!(snake.head().current_position, grid().cell(3, 0));
        assert_eq!(snake.head().direction, Vec2::new(0.0, 1.0));
        assert_eq!(snake.head().next_position, grid().cell(3, 1));
    }

    #[test]
    fn test_first_step_recycles_tail() {
        let mut snake = resting_snake();
        let keys: Vec<SegmentKey> = snake.segments().map(|(key, _)| key).collect();
        let old_head = keys[0];
        let old_tail = keys[3];
        let target = snake.head().next_position;

        snake.request_direction(Direction::Right);
        assert_eq!(snake.head().next_position, grid().cell(3, 0));
        let target_after_commit = snake.head().next_position;
        assert_ne!(target, target_after_commit);

        let frames = run_step(&mut snake);
        assert!(frames > 1);

        // The old head reached its target and now sits behind the new head
        let old_head_segment = snake.segment(old_head).unwrap();
        assert_eq!(old_head_segment.current_position, target_after_commit);
        assert!(!old_head_segment.is_moving());

        // The old tail was rotated to the front, on the same tile
        assert_eq!(snake.head_key(), old_tail);
        assert_eq!(snake.head().next(), Some(old_head));
        assert_eq!(snake.tail_key(), keys[2]);
        assert_ne!(snake.tail_key(), old_tail);

        // ...and immediately committed to the following tile
        assert_eq!(snake.head().direction, Vec2::new(1.0, 0.0));
        assert_eq!(snake.head().next_position, grid().cell(4, 0));

        assert_eq!(snake.len(), 4);
        assert_chain_consistent(&snake);
    }

    #[test]
    fn test_interior_segments_are_at_rest_between_steps() {
        let mut snake = resting_snake();
        snake.request_direction(Direction::Right);

        for _ in 0..20 {
            run_step(&mut snake);

            let interior: Vec<&Segment> = snake
                .segments()
                .filter(|(key, _)| *key != snake.head_key() && *key != snake.tail_key())
                .map(|(_, segment)| segment)
                .collect();
            assert!(interior.iter().all(|segment| !segment.is_moving()));
            assert!(interior.iter().all(|segment| grid().contains(segment.current_position)));
            assert_eq!(snake.len(), 4);
            assert_chain_consistent(&snake);
        }
    }

    #[test]
    fn test_grow_appends_tail() {
        let mut snake = resting_snake();
        let old_tail = snake.tail_key();
        let position = grid().cell(0, 1);

        let key = snake.grow(position);

        assert_eq!(snake.len(), 5);
        assert_eq!(snake.tail_key(), key);
        assert_eq!(snake.tail().previous(), Some(old_tail));
        assert_eq!(snake.tail().direction, Vec2::ZERO);
        assert_eq!(snake.tail().current_position, position);
        assert_eq!(snake.tail().next_position, position);
        assert_eq!(snake.tail().previous_position, position);
        assert_chain_consistent(&snake);
    }

    #[test]
    fn test_growth_while_moving() {
        let mut snake = resting_snake();
        snake.request_direction(Direction::Right);

        for grown in 1..=6 {
            let mut crossed = false;
            while !crossed {
                crossed = snake.tick(FRAME, |snake| {
                    let vacated = snake.head().previous_position;
                    snake.grow(vacated);
                });
            }
            assert_eq!(snake.len(), 4 + grown);
            assert_chain_consistent(&snake);
        }
    }

    #[test]
    fn test_head_wraps_right_edge() {
        let mut snake = Snake::from_cells(grid(), 150.0, &[(29, 5), (28, 5), (27, 5), (26, 5)]);
        let leader = snake.head_key();
        snake.request_direction(Direction::Right);

        // Crossing the edge moves the head just off the left side
        assert!(!snake.tick(FRAME, |_| {}));
        let mut last_x = snake.segment(leader).unwrap().current_position.x;
        assert!(last_x < 0.0 && last_x > -16.0);
        assert_eq!(snake.segment(leader).unwrap().current_position.y, 80.0);
        assert_eq!(snake.segment(leader).unwrap().next_position, grid().cell(0, 5));

        while !snake.tick(FRAME, |_| {}) {
            let x = snake.segment(leader).unwrap().current_position.x;
            assert!(x > last_x);
            last_x = x;
        }

        assert_eq!(snake.segment(leader).unwrap().current_position, grid().cell(0, 5));
        assert_eq!(snake.head().current_position, grid().cell(0, 5));
    }

    #[test]
    fn test_head_wraps_top_edge() {
        let mut snake = Snake::from_cells(grid(), 150.0, &[(4, 0), (4, 1), (4, 2), (4, 3)]);
        snake.request_direction(Direction::Up);

        run_step(&mut snake);

        assert_eq!(snake.head().current_position, grid().cell(4, 29));
        assert!(snake.segments().all(|(_, s)| grid().contains(s.current_position)));
    }

    #[test]
    fn test_tail_follows_across_edge() {
        let mut snake = Snake::from_cells(grid(), 150.0, &[(1, 3), (0, 3), (29, 3)]);

        snake.request_direction(Direction::Right);

        assert_eq!(snake.tail().direction, Vec2::new(1.0, 0.0));

        run_step(&mut snake);

        // The recycled tail crossed the edge and landed on the head's tile
        assert_eq!(snake.head().current_position, grid().cell(2, 3));
        assert_eq!(snake.tail().current_position, grid().cell(0, 3));
    }

    #[test]
    fn test_stops_at_boundary_on_zero_direction() {
        let mut snake = resting_snake();
        snake.request_direction(Direction::Right);
        snake.request_direction(Vec2::ZERO);
        assert!(snake.is_moving());

        run_step(&mut snake);

        assert_eq!(snake.motion(), Motion::Stopped);
        let resting: Vec<Vec2> = snake.segments().map(|(_, s)| s.current_position).collect();
        assert!(!snake.tick(FRAME, |_| {}));
        let after: Vec<Vec2> = snake.segments().map(|(_, s)| s.current_position).collect();
        assert_eq!(resting, after);
    }

    #[test]
    fn test_large_frame_snaps_to_target() {
        let mut snake = resting_snake();
        snake.request_direction(Direction::Left);

        assert!(snake.tick(1.0, |_| {}));
        assert_eq!(snake.segments().count(), 4);
        assert!(snake.segments().all(|(_, s)| grid().contains(s.current_position)));
    }

    #[test]
    fn test_large_frame_wraps_at_edge() {
        let mut snake = Snake::from_cells(grid(), 150.0, &[(0, 5), (1, 5), (2, 5), (3, 5)]);
        snake.request_direction(Direction::Left);

        assert!(snake.tick(0.2, |_| {}));

        assert_eq!(snake.head().current_position, grid().cell(29, 5));
        assert_eq!(snake.head().next_position, grid().cell(28, 5));
        assert!(snake.segments().all(|(_, s)| grid().contains(s.current_position)));
        assert_chain_consistent(&snake);
    }
}
