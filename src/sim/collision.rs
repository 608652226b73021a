//! Collision detection shared by breakout and pong
//!
//! Balls are tested by their bounding box against axis-aligned rectangles,
//! not by true circle-rectangle distance. That is what gives both games their
//! slightly forgiving edges.

use glam::Vec2;

use super::motion::{Axis, reflect};

/// Axis-aligned rectangle (origin at top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Strictly inside the horizontal span (edges excluded)
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.x && x < self.right()
    }

    /// Strictly inside the vertical span (edges excluded)
    #[inline]
    pub fn spans_y(&self, y: f32) -> bool {
        y > self.y && y < self.bottom()
    }
}

/// Ball center inside the rect's columns and ball extent overlapping its rows
pub fn ball_overlaps_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    rect.spans_x(center.x) && center.y - radius < rect.bottom() && center.y + radius > rect.y
}

/// Ball has sunk below the top surface of `rect` while over it
///
/// Only the top surface counts, so a ball already under the paddle but still
/// within its columns is caught too.
pub fn ball_reaches_top(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.y + radius > rect.y && rect.spans_x(center.x)
}

/// `item` has dropped past the top surface of `surface` with overlapping columns
pub fn rect_reaches_top(item: &Rect, surface: &Rect) -> bool {
    item.bottom() > surface.y && item.right() > surface.x && item.x < surface.right()
}

/// Which playfield walls reflect the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Walls {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Walls {
    /// Breakout: side walls and ceiling, open floor
    pub const SIDES_AND_CEILING: Self = Self {
        left: true,
        right: true,
        top: true,
        bottom: false,
    };

    /// Pong: ceiling and floor, open sides
    pub const CEILING_AND_FLOOR: Self = Self {
        left: false,
        right: false,
        top: true,
        bottom: true,
    };
}

/// Walls touched during a bounce check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallContact {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Reflect `velocity` off any enabled wall the ball has crossed.
///
/// The flip is unconditional: a ball still past a wall on the next step flips
/// back again. Each axis flips at most once per call.
pub fn bounce_off_walls(
    center: Vec2,
    velocity: &mut Vec2,
    radius: f32,
    playfield: Vec2,
    walls: Walls,
) -> WallContact {
    let mut contact = WallContact::default();

    let past_left = walls.left && center.x - radius < 0.0;
    let past_right = walls.right && center.x + radius > playfield.x;
    if past_left || past_right {
        *velocity = reflect(*velocity, Axis::X);
        contact.horizontal = true;
    }

    let past_top = walls.top && center.y - radius < 0.0;
    let past_bottom = walls.bottom && center.y + radius > playfield.y;
    if past_top || past_bottom {
        *velocity = reflect(*velocity, Axis::Y);
        contact.vertical = true;
    }

    contact
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_ball_overlaps_rect() {
        let block = Rect::new(100.0, 100.0, 60.0, 20.0);

        // Center inside, touching from below
        assert!(ball_overlaps_rect(Vec2::new(130.0, 125.0), 12.0, &block));
        // Center inside columns but too far below
        assert!(!ball_overlaps_rect(Vec2::new(130.0, 140.0), 12.0, &block));
        // Extent overlaps but center is past the right edge
        assert!(!ball_overlaps_rect(Vec2::new(165.0, 110.0), 12.0, &block));
        // Exactly on the edge does not count
        assert!(!ball_overlaps_rect(Vec2::new(100.0, 110.0), 12.0, &block));
    }

    #[test]
    fn test_ball_reaches_top() {
        let paddle = Rect::new(340.0, 570.0, 120.0, 15.0);
        assert!(ball_reaches_top(Vec2::new(400.0, 560.0), 12.0, &paddle));
        assert!(!ball_reaches_top(Vec2::new(400.0, 550.0), 12.0, &paddle));
        assert!(!ball_reaches_top(Vec2::new(300.0, 560.0), 12.0, &paddle));
        // Below the paddle still counts
        assert!(ball_reaches_top(Vec2::new(400.0, 590.0), 12.0, &paddle));
    }

    #[test]
    fn test_rect_reaches_top() {
        let paddle = Rect::new(340.0, 570.0, 120.0, 15.0);
        assert!(rect_reaches_top(&Rect::new(330.0, 555.0, 20.0, 20.0), &paddle));
        assert!(!rect_reaches_top(&Rect::new(330.0, 545.0, 20.0, 20.0), &paddle));
        assert!(!rect_reaches_top(&Rect::new(460.0, 560.0, 20.0, 20.0), &paddle));
    }

    #[test]
    fn test_left_wall_flips_unconditionally() {
        // Already heading right, still past the wall: flips anyway
        let mut vel = Vec2::new(4.0, -4.0);
        let contact = bounce_off_walls(
            Vec2::new(5.0, 300.0),
            &mut vel,
            12.0,
            FIELD,
            Walls::SIDES_AND_CEILING,
        );
        assert!(contact.horizontal);
        assert_eq!(vel, Vec2::new(-4.0, -4.0));
    }

    #[test]
    fn test_ceiling_and_corner() {
        let mut vel = Vec2::new(4.0, -4.0);
        let contact = bounce_off_walls(
            Vec2::new(795.0, 5.0),
            &mut vel,
            12.0,
            FIELD,
            Walls::SIDES_AND_CEILING,
        );
        assert!(contact.horizontal && contact.vertical);
        assert_eq!(vel, Vec2::new(-4.0, 4.0));
    }

    #[test]
    fn test_open_floor_does_not_reflect() {
        let mut vel = Vec2::new(0.0, 4.0);
        let contact = bounce_off_walls(
            Vec2::new(400.0, 620.0),
            &mut vel,
            12.0,
            FIELD,
            Walls::SIDES_AND_CEILING,
        );
        assert_eq!(contact, WallContact::default());
        assert_eq!(vel, Vec2::new(0.0, 4.0));

        let contact = bounce_off_walls(
            Vec2::new(400.0, 595.0),
            &mut vel,
            10.0,
            FIELD,
            Walls::CEILING_AND_FLOOR,
        );
        assert!(contact.vertical);
        assert_eq!(vel, Vec2::new(0.0, -4.0));
    }
}
