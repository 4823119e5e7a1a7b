//! Cell-grid geometry primitives.

/// A position on the character-cell screen (column, row), zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub col: u16,
    pub row: u16,
}

impl Point {
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

/// A rectangular cell region. `col`/`row` name the top-left corner;
/// the right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(col: u16, row: u16, width: u16, height: u16) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    /// First column past the right edge.
    pub const fn right(&self) -> u16 {
        self.col.saturating_add(self.width)
    }

    /// First row past the bottom edge.
    pub const fn bottom(&self) -> u16 {
        self.row.saturating_add(self.height)
    }

    pub const fn contains(&self, point: Point) -> bool {
        point.col >= self.col
            && point.col < self.right()
            && point.row >= self.row
            && point.row < self.bottom()
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(2, 1, 4, 3);
        assert!(rect.contains(Point::new(2, 1)));
        assert!(rect.contains(Point::new(5, 3)));
        assert!(!rect.contains(Point::new(6, 1)));
        assert!(!rect.contains(Point::new(2, 4)));
        assert!(!rect.contains(Point::new(1, 2)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let rect = Rect::new(3, 3, 0, 5);
        assert!(rect.is_empty());
        assert!(!rect.contains(Point::new(3, 3)));
    }

    #[test]
    fn edges_saturate_instead_of_overflowing() {
        let rect = Rect::new(u16::MAX - 1, u16::MAX - 1, 4, 4);
        assert_eq!(rect.right(), u16::MAX);
        assert_eq!(rect.bottom(), u16::MAX);
    }
}
