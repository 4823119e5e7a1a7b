//! Owned character-cell surfaces.
//!
//! A `Surface` is the toolkit's stand-in for a terminal window: a grid of
//! styled cells pinned to a screen position. Widgets render into their own
//! surface and are blitted onto their window's surface during the map pass;
//! the panel stack blits window surfaces onto the root frame in stacking
//! order. All clipping happens here so callers can write unconditionally.

use std::cell::RefCell;
use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::core::geometry::Rect;
use crate::render::style::TextStyle;

/// Shared handle to a surface.
///
/// A window owns its surface through this handle while the panel stack holds
/// a second reference for compositing. Single-threaded, hence `Rc<RefCell>`.
pub type SharedSurface = Rc<RefCell<Surface>>;

/// One screen cell: a grapheme cluster plus its style.
///
/// A double-width cluster occupies two cells; the trailing cell keeps an
/// empty symbol and contributes nothing when a row is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub symbol: String,
    pub style: TextStyle,
}

impl Cell {
    fn blank(style: TextStyle) -> Self {
        Self {
            symbol: " ".to_string(),
            style,
        }
    }

    fn continuation(style: TextStyle) -> Self {
        Self {
            symbol: String::new(),
            style,
        }
    }

    /// Whether this cell is the tail half of a double-width cluster.
    pub fn is_continuation(&self) -> bool {
        self.symbol.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Surface {
    rect: Rect,
    cells: Vec<Cell>,
    style: TextStyle,
}

impl Surface {
    /// Allocate a blank surface of `height` x `width` cells at screen
    /// position (`row`, `col`). Argument order follows the terminal
    /// convention: size first, then placement.
    pub fn new(height: u16, width: u16, row: u16, col: u16) -> Self {
        let style = TextStyle::plain();
        Self {
            rect: Rect::new(col, row, width, height),
            cells: vec![Cell::blank(style); width as usize * height as usize],
            style,
        }
    }

    pub fn width(&self) -> u16 {
        self.rect.width
    }

    pub fn height(&self) -> u16 {
        self.rect.height
    }

    /// Screen-absolute placement of this surface.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_position(&mut self, row: u16, col: u16) {
        self.rect.row = row;
        self.rect.col = col;
    }

    /// Current attribute state, applied to every subsequent write.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    /// Reset attributes to plain defaults.
    pub fn reset_style(&mut self) {
        self.style = TextStyle::plain();
    }

    fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row >= self.rect.height || col >= self.rect.width {
            return None;
        }
        Some(row as usize * self.rect.width as usize + col as usize)
    }

    pub fn cell(&self, row: u16, col: u16) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Style of the cell at (`row`, `col`); plain when out of bounds.
    pub fn style_at(&self, row: u16, col: u16) -> TextStyle {
        self.cell(row, col).map_or(TextStyle::plain(), |c| c.style)
    }

    /// Write `text` starting at (`row`, `col`) in the current style.
    ///
    /// Grapheme clusters take one cell each, double-width clusters two with
    /// the second marked as a continuation. Writing clips at the right edge;
    /// a wide cluster that no longer fits is dropped entirely.
    pub fn write_text(&mut self, row: u16, col: u16, text: &str) {
        if row >= self.rect.height {
            return;
        }
        let mut col = col;
        for cluster in text.graphemes(true) {
            let cluster_width = cluster.width() as u16;
            if cluster_width == 0 {
                continue;
            }
            if col >= self.rect.width || cluster_width > self.rect.width - col {
                break;
            }
            let style = self.style;
            if let Some(i) = self.index(row, col) {
                self.cells[i] = Cell {
                    symbol: cluster.to_string(),
                    style,
                };
            }
            if cluster_width == 2 {
                if let Some(i) = self.index(row, col + 1) {
                    self.cells[i] = Cell::continuation(style);
                }
            }
            col += cluster_width;
        }
    }

    /// Overwrite an entire row with blanks in the current style.
    ///
    /// Attributes carry over on purpose: callers paint a background band by
    /// setting a style first, then write chrome text over it.
    pub fn clear_line(&mut self, row: u16) {
        if row >= self.rect.height {
            return;
        }
        let blank = Cell::blank(self.style);
        for col in 0..self.rect.width {
            if let Some(i) = self.index(row, col) {
                self.cells[i] = blank.clone();
            }
        }
    }

    /// Blank every cell in the current style.
    pub fn clear(&mut self) {
        let blank = Cell::blank(self.style);
        self.cells.fill(blank);
    }

    /// Copy this surface onto `target`, aligning both by their
    /// screen-absolute positions and clipping to the overlap.
    pub fn blit_to(&self, target: &mut Surface) {
        for src_row in 0..self.rect.height {
            let screen_row = self.rect.row.saturating_add(src_row);
            if screen_row < target.rect.row || screen_row >= target.rect.bottom() {
                continue;
            }
            let dst_row = screen_row - target.rect.row;
            for src_col in 0..self.rect.width {
                let screen_col = self.rect.col.saturating_add(src_col);
                if screen_col < target.rect.col || screen_col >= target.rect.right() {
                    continue;
                }
                let dst_col = screen_col - target.rect.col;
                let src_index = src_row as usize * self.rect.width as usize + src_col as usize;
                if let Some(i) = target.index(dst_row, dst_col) {
                    target.cells[i] = self.cells[src_index].clone();
                }
            }
        }
    }

    /// One row's visible text. Continuation cells contribute nothing so the
    /// string's display width matches the surface width.
    pub fn row_text(&self, row: u16) -> String {
        let mut out = String::new();
        for col in 0..self.rect.width {
            if let Some(cell) = self.cell(row, col) {
                out.push_str(&cell.symbol);
            }
        }
        out
    }

    /// The whole grid as one string per row.
    pub fn rows_text(&self) -> Vec<String> {
        (0..self.rect.height).map(|row| self.row_text(row)).collect()
    }

    /// Wrap into a shared handle.
    pub fn into_shared(self) -> SharedSurface {
        Rc::new(RefCell::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::Surface;
    use crate::core::geometry::Rect;
    use crate::render::style::{ColorPair, TextStyle};

    #[test]
    fn surfaces_report_their_placement() {
        let surface = Surface::new(2, 4, 3, 12);
        assert_eq!(surface.rect(), Rect::new(12, 3, 4, 2));
        assert_eq!(surface.height(), 2);
        assert_eq!(surface.width(), 4);
    }

    #[test]
    fn write_text_clips_at_right_edge() {
        let mut surface = Surface::new(1, 5, 0, 0);
        surface.write_text(0, 3, "abcdef");
        assert_eq!(surface.row_text(0), "   ab");
    }

    #[test]
    fn write_text_handles_double_width_clusters() {
        let mut surface = Surface::new(1, 6, 0, 0);
        surface.write_text(0, 0, "a你b");
        assert_eq!(surface.row_text(0), "a你b  ");
        assert!(surface.cell(0, 2).unwrap().is_continuation());
        assert_eq!(surface.cell(0, 3).unwrap().symbol, "b");
    }

    #[test]
    fn wide_cluster_that_does_not_fit_is_dropped() {
        let mut surface = Surface::new(1, 3, 0, 0);
        surface.write_text(0, 2, "你");
        assert_eq!(surface.row_text(0), "   ");
    }

    #[test]
    fn clear_line_preserves_current_style() {
        let mut surface = Surface::new(2, 4, 0, 0);
        surface.set_style(TextStyle::with_pair(ColorPair::FooterBar).reverse());
        surface.clear_line(1);
        let style = surface.style_at(1, 3);
        assert!(style.reverse);
        assert_eq!(style.pair, ColorPair::FooterBar);
        assert_eq!(surface.style_at(0, 0), TextStyle::plain());
    }

    #[test]
    fn blit_aligns_by_screen_position_and_clips() {
        let mut window = Surface::new(3, 6, 2, 10);
        let mut popup = Surface::new(2, 4, 3, 12);
        popup.write_text(0, 0, "pop!");
        popup.write_text(1, 0, "more");
        popup.blit_to(&mut window);
        assert_eq!(window.row_text(0), "      ");
        assert_eq!(window.row_text(1), "  pop!");
        assert_eq!(window.row_text(2), "  more");

        // A surface hanging off the right edge loses the overhang only.
        let mut wide = Surface::new(1, 4, 2, 14);
        wide.write_text(0, 0, "wxyz");
        wide.blit_to(&mut window);
        assert_eq!(window.row_text(0), "    wx");
    }

    #[test]
    fn rows_text_reports_every_row() {
        let mut surface = Surface::new(2, 3, 0, 0);
        surface.write_text(0, 0, "hi");
        assert_eq!(
            surface.rows_text(),
            vec!["hi ".to_string(), "   ".to_string()]
        );
    }
}
