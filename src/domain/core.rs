//! Core domain types and operations
//!
//! Pure geometry shared by the window manager, gesture tracker and scene
//! renderer. All coordinates are viewport pixels with the origin at the
//! top-left corner of the page.

/// Point in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = (i64::from(other.x) - i64::from(self.x)) as f32;
        let dy = (i64::from(other.y) - i64::from(self.y)) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Rectangle in viewport pixels
///
/// `x` is the left edge and `y` the top edge, matching the `left`/`top`
/// style properties the page positions windows with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns true if this rectangle contains the given point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns a copy moved by the given delta, saturating at the `i32` range
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.w, self.h)
    }
}

/// Size of the page viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Full-page rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Rectangle a maximized window occupies: 95vw x 90vh at (2.5vw, 5vh)
    pub fn maximized_rect(&self) -> Rect {
        Rect::new(
            self.width * 25 / 1000,
            self.height * 5 / 100,
            self.width * 95 / 100,
            self.height * 90 / 100,
        )
    }

    /// Centers a window of the given size, shrinking it to fit when needed
    pub fn centered(&self, width: i32, height: i32) -> Rect {
        let w = width.min(self.width * 95 / 100);
        let h = height.min(self.height * 80 / 100);
        Rect::new((self.width - w) / 2, (self.height - h) / 2, w, h)
    }
}
