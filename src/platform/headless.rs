//! In-memory screen for tests and non-interactive runs.
//!
//! `HeadlessScreen` implements the full `Screen` contract over an internal
//! panel stack and a scripted input queue. Nothing touches a tty: refresh
//! just counts, and `snapshot`/`style_at` composite the stack into a frame
//! on demand so tests can assert on what a terminal would show.

use std::collections::VecDeque;
use std::io;

use crate::core::input_event::{parse_input_events, InputEvent};
use crate::core::screen::Screen;
use crate::render::panels::{PanelId, PanelStack};
use crate::render::style::TextStyle;
use crate::render::surface::{SharedSurface, Surface};

pub struct HeadlessScreen {
    rows: u16,
    cols: u16,
    colors: bool,
    panels: PanelStack,
    queue: VecDeque<InputEvent>,
    blocking: bool,
    extended_keys: bool,
    refreshes: usize,
}

impl HeadlessScreen {
    /// A color-capable screen of `rows` x `cols` cells.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            colors: true,
            panels: PanelStack::new(),
            queue: VecDeque::new(),
            blocking: false,
            extended_keys: false,
            refreshes: 0,
        }
    }

    /// Same screen reporting no color support.
    pub fn monochrome(rows: u16, cols: u16) -> Self {
        Self {
            colors: false,
            ..Self::new(rows, cols)
        }
    }

    /// Queue raw terminal bytes; they are decoded into events immediately.
    pub fn push_input(&mut self, raw: &str) {
        self.queue.extend(parse_input_events(raw));
    }

    /// Queue an already-decoded event.
    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Change the reported geometry and queue the matching resize event.
    pub fn resize_to(&mut self, rows: u16, cols: u16) {
        self.rows = rows;
        self.cols = cols;
        self.queue.push_back(InputEvent::Resize {
            columns: cols,
            rows,
        });
    }

    pub fn panels(&self) -> &PanelStack {
        &self.panels
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    pub fn extended_keys_enabled(&self) -> bool {
        self.extended_keys
    }

    fn frame(&self) -> Surface {
        let mut frame = Surface::new(self.rows, self.cols, 0, 0);
        self.panels.composite(&mut frame);
        frame
    }

    /// The composited screen contents, one string per row.
    pub fn snapshot(&self) -> Vec<String> {
        self.frame().rows_text()
    }

    pub fn snapshot_row(&self, row: u16) -> String {
        self.frame().row_text(row)
    }

    /// Style of the composited cell at (`row`, `col`).
    pub fn style_at(&self, row: u16, col: u16) -> TextStyle {
        self.frame().style_at(row, col)
    }
}

impl Screen for HeadlessScreen {
    fn rows(&self) -> u16 {
        self.rows
    }

    fn cols(&self) -> u16 {
        self.cols
    }

    fn has_colors(&self) -> bool {
        self.colors
    }

    fn create_surface(&mut self, height: u16, width: u16, row: u16, col: u16) -> SharedSurface {
        Surface::new(height, width, row, col).into_shared()
    }

    fn create_panel(&mut self, surface: &SharedSurface) -> PanelId {
        self.panels.push(SharedSurface::clone(surface))
    }

    fn hide_panel(&mut self, panel: PanelId) {
        self.panels.hide(panel);
    }

    fn show_panel(&mut self, panel: PanelId) {
        self.panels.show(panel);
    }

    fn raise_panel(&mut self, panel: PanelId) {
        self.panels.raise(panel);
    }

    fn release_panel(&mut self, panel: PanelId) {
        self.panels.remove(panel);
    }

    fn set_input_blocking(&mut self, blocking: bool) {
        self.blocking = blocking;
    }

    fn is_input_blocking(&self) -> bool {
        self.blocking
    }

    fn enable_extended_keys(&mut self, enabled: bool) {
        self.extended_keys = enabled;
    }

    fn read_input(&mut self) -> Vec<InputEvent> {
        self.queue.drain(..).collect()
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.refreshes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::HeadlessScreen;
    use crate::core::input::Key;
    use crate::core::input_event::InputEvent;
    use crate::core::screen::Screen;

    #[test]
    fn snapshots_composite_panels_in_stacking_order() {
        let mut screen = HeadlessScreen::new(3, 10);
        let below = screen.create_surface(1, 5, 1, 0);
        below.borrow_mut().write_text(0, 0, "below");
        let buried = screen.create_panel(&below);

        let above = screen.create_surface(1, 5, 1, 3);
        above.borrow_mut().write_text(0, 0, "above");
        screen.create_panel(&above);

        assert_eq!(screen.snapshot_row(1), "belabove  ");

        screen.raise_panel(buried);
        assert_eq!(screen.snapshot_row(1), "belowove  ");
    }

    #[test]
    fn hidden_panels_disappear_from_snapshots() {
        let mut screen = HeadlessScreen::new(1, 4);
        let surface = screen.create_surface(1, 4, 0, 0);
        surface.borrow_mut().write_text(0, 0, "text");
        let panel = screen.create_panel(&surface);

        screen.hide_panel(panel);
        assert_eq!(screen.snapshot_row(0), "    ");
        screen.show_panel(panel);
        assert_eq!(screen.snapshot_row(0), "text");
    }

    #[test]
    fn pushed_input_is_decoded_into_events() {
        let mut screen = HeadlessScreen::new(1, 1);
        screen.push_input("a\x1b[A");
        assert_eq!(
            screen.read_input(),
            vec![
                InputEvent::Key(Key::Char('a')),
                InputEvent::Key(Key::Up)
            ]
        );
        assert!(screen.read_input().is_empty());
    }

    #[test]
    fn resizing_reports_the_new_geometry_and_queues_an_event() {
        let mut screen = HeadlessScreen::new(24, 80);
        screen.resize_to(50, 132);
        assert_eq!(screen.rows(), 50);
        assert_eq!(screen.cols(), 132);
        assert_eq!(
            screen.read_input(),
            vec![InputEvent::Resize {
                columns: 132,
                rows: 50
            }]
        );
    }

    #[test]
    fn refreshes_are_counted() {
        let mut screen = HeadlessScreen::new(1, 1);
        assert_eq!(screen.refresh_count(), 0);
        screen.refresh().unwrap();
        screen.refresh().unwrap();
        assert_eq!(screen.refresh_count(), 2);
    }
}
