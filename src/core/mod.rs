//! Core contracts: geometry, input decoding, key bindings, widgets, screens.

pub mod geometry;
pub mod input;
pub mod input_event;
pub mod keybindings;
pub mod screen;
pub mod widget;
