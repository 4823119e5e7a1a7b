//! Character-cell UI toolkit for terminal traffic inspectors.
//!
//! Invariant: a [`Window`] owns its widget tree — widgets are addressed by
//! [`WidgetId`], never by reference, and the window is the only focus
//! authority.
//!
//! # Public API Overview
//! - Build a widget tree ([`Label`], [`Button`], [`Pane`], or your own
//!   [`Widget`] impls) and attach it to a [`Window`], the focus owner and
//!   input router.
//! - Decode terminal bytes with [`parse_input_events`]; keys resolve
//!   through the global [`KeyBindings`] table before widgets see them.
//! - Render through a [`Screen`]: `TermScreen` on a Unix tty,
//!   [`HeadlessScreen`] in tests and non-interactive runs.

#![allow(clippy::needless_range_loop, clippy::unnecessary_map_or)]

pub mod config;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod widgets;

/// Widget tree contracts.
pub use crate::core::widget::{Container, InputVerdict, Widget, WidgetBase, WidgetId};

/// Windows, their kind tags and per-kind hooks.
pub use crate::runtime::focus::FocusChain;
pub use crate::runtime::window::{NoHooks, Window, WindowHooks, WindowKind};

/// Keyboard and mouse input decoding.
pub use crate::core::input::Key;
pub use crate::core::input_event::{parse_input_events, InputEvent, MouseButton, MouseEvent};

/// Key-to-action resolution against the global table.
pub use crate::core::keybindings::{configure, find_action, KeyAction, KeyBindings};

/// Screen contract and implementations.
pub use crate::core::screen::Screen;
pub use crate::platform::headless::HeadlessScreen;
#[cfg(unix)]
pub use crate::platform::term_screen::TermScreen;

/// Cell-grid primitives.
pub use crate::core::geometry::{Point, Rect};
pub use crate::render::panels::{PanelId, PanelStack};
pub use crate::render::style::{ColorPair, TextStyle};
pub use crate::render::surface::{Cell, SharedSurface, Surface};

/// Built-in widgets.
pub use crate::widgets::{Button, Label, Pane};

/// Environment-driven configuration.
pub use crate::config::EnvConfig;
