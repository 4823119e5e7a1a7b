//! Terminal surface adapter contract.
//!
//! Everything the window core needs from a terminal, as one trait: size and
//! color queries, surface allocation, panel stacking, input-mode switches and
//! event reads. `platform::TermScreen` implements it over the process tty;
//! `platform::HeadlessScreen` implements it in memory for tests.

use std::io;

use crate::core::input_event::InputEvent;
use crate::render::panels::PanelId;
use crate::render::surface::SharedSurface;

pub trait Screen {
    /// Current screen height in rows.
    fn rows(&self) -> u16;

    /// Current screen width in columns.
    fn cols(&self) -> u16;

    fn has_colors(&self) -> bool;

    /// Allocate a surface pinned at (`row`, `col`). The screen keeps no
    /// reference; stacking only happens through `create_panel`.
    fn create_surface(&mut self, height: u16, width: u16, row: u16, col: u16) -> SharedSurface;

    /// Push a surface onto the panel stack (topmost).
    fn create_panel(&mut self, surface: &SharedSurface) -> PanelId;

    fn hide_panel(&mut self, panel: PanelId);

    fn show_panel(&mut self, panel: PanelId);

    fn raise_panel(&mut self, panel: PanelId);

    /// Drop the panel from the stack. The surface stays alive as long as its
    /// owner holds it.
    fn release_panel(&mut self, panel: PanelId);

    /// Switch between the zero-timeout default and fully blocking reads.
    ///
    /// This is a global mode switch on the shared terminal; callers that
    /// enable blocking reads must restore non-blocking mode before handing
    /// control back (the help-hook contract).
    fn set_input_blocking(&mut self, blocking: bool);

    fn is_input_blocking(&self) -> bool;

    /// Keypad/application-keys mode, so cursor and function keys arrive as
    /// decodable sequences.
    fn enable_extended_keys(&mut self, enabled: bool);

    /// Drain pending input. Non-blocking mode returns an empty vec when
    /// nothing is queued.
    fn read_input(&mut self) -> Vec<InputEvent>;

    /// Composite visible panels bottom-up and present the frame.
    fn refresh(&mut self) -> io::Result<()>;
}
