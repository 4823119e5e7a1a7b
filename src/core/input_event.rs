//! Structured input events produced by the platform layer.

use crate::core::geometry::Point;
use crate::core::input::{
    csi_sequence_len, escape_sequence_key, plain_char_key, Key, MAX_SEQUENCE_LEN,
};

/// Which mouse button an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

/// A decoded mouse event at a screen-absolute cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub button: MouseButton,
    pub point: Point,
    pub pressed: bool,
}

impl MouseEvent {
    /// Whether this is the left-button press windows treat as a click.
    pub fn is_left_click(&self) -> bool {
        self.button == MouseButton::Left && self.pressed
    }
}

/// Input event delivered to windows.
///
/// Notes:
/// - `Resize` comes from the platform layer reacting to SIGWINCH, never from
///   the byte stream.
/// - `UnknownRaw` keeps undecodable sequences visible to the debug log
///   instead of silently dropping them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Mouse(MouseEvent),
    Resize { columns: u16, rows: u16 },
    UnknownRaw { raw: String },
}

/// Split a chunk of terminal input into events.
///
/// Escape sequences are matched longest-first against the known table; SGR
/// mouse reports are decoded in place; anything unrecognized is carried as
/// `UnknownRaw` so nothing of the stream goes missing.
pub fn parse_input_events(data: &str) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let (event, consumed) = next_event(rest);
        if let Some(event) = event {
            events.push(event);
        }
        rest = &rest[consumed.max(1)..];
    }
    events
}

fn next_event(data: &str) -> (Option<InputEvent>, usize) {
    if let Some((mouse, consumed)) = parse_sgr_mouse(data) {
        return (Some(InputEvent::Mouse(mouse)), consumed);
    }

    if data.starts_with('\x1b') {
        let limit = MAX_SEQUENCE_LEN.min(data.len());
        for len in (2..=limit).rev() {
            if !data.is_char_boundary(len) {
                continue;
            }
            if let Some(key) = escape_sequence_key(&data[..len]) {
                return (Some(InputEvent::Key(key)), len);
            }
        }
        if data.len() == 1 {
            return (Some(InputEvent::Key(Key::Escape)), 1);
        }
        if let Some(len) = csi_sequence_len(data) {
            return (
                Some(InputEvent::UnknownRaw {
                    raw: data[..len].to_string(),
                }),
                len,
            );
        }
        // ESC plus a printable is a meta chord.
        if let Some(ch) = data[1..].chars().next() {
            if !ch.is_control() {
                return (Some(InputEvent::Key(Key::Alt(ch))), 1 + ch.len_utf8());
            }
        }
        // Bare ESC followed by more input: deliver the escape alone.
        return (Some(InputEvent::Key(Key::Escape)), 1);
    }

    let ch = match data.chars().next() {
        Some(ch) => ch,
        None => return (None, data.len()),
    };
    let consumed = ch.len_utf8();
    match plain_char_key(ch) {
        Some(key) => (Some(InputEvent::Key(key)), consumed),
        None => (
            Some(InputEvent::UnknownRaw {
                raw: ch.to_string(),
            }),
            consumed,
        ),
    }
}

/// Decode an SGR mouse report (`ESC [ < cb ; col ; row M|m`).
///
/// Coordinates arrive 1-based and are returned 0-based. Motion reports and
/// unknown buttons are left for the raw-sequence fallback.
fn parse_sgr_mouse(data: &str) -> Option<(MouseEvent, usize)> {
    let body = data.strip_prefix("\x1b[<")?;
    let end = body.find(['M', 'm'])?;
    let pressed = body.as_bytes()[end] == b'M';
    let consumed = 3 + end + 1;

    let mut parts = body[..end].split(';');
    let cb = parts.next()?.parse::<u16>().ok()?;
    let col = parts.next()?.parse::<u16>().ok()?;
    let row = parts.next()?.parse::<u16>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    // Bit 32 marks motion reports.
    if cb & 32 != 0 {
        return None;
    }
    // Bits 4, 8 and 16 are the shift, meta and ctrl modifiers.
    let button = match cb & !(4 | 8 | 16) {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        64 => MouseButton::WheelUp,
        65 => MouseButton::WheelDown,
        _ => return None,
    };

    Some((
        MouseEvent {
            button,
            point: Point::new(col.saturating_sub(1), row.saturating_sub(1)),
            pressed,
        },
        consumed,
    ))
}
