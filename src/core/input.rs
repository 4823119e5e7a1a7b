//! Key decoding.
//!
//! Translates the byte sequences a terminal emits into the symbolic keys the
//! rest of the toolkit works with. Only the legacy (non-kitty) encodings are
//! handled; that is what the capture consoles this toolkit targets emit.

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A printable character, as typed.
    Char(char),
    /// A control chord, carried as its lowercase letter (`Ctrl('c')`).
    Ctrl(char),
    /// An ESC-prefixed printable (meta chord).
    Alt(char),
    Enter,
    Tab,
    BackTab,
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    /// Function keys F1 through F12.
    F(u8),
}

/// Longest entry in the escape-sequence table.
pub(crate) const MAX_SEQUENCE_LEN: usize = 5;

/// Decode one complete escape sequence into a key.
pub(crate) fn escape_sequence_key(data: &str) -> Option<Key> {
    let key = match data {
        "\x1b[A" | "\x1bOA" => Key::Up,
        "\x1b[B" | "\x1bOB" => Key::Down,
        "\x1b[C" | "\x1bOC" => Key::Right,
        "\x1b[D" | "\x1bOD" => Key::Left,
        "\x1b[H" | "\x1bOH" | "\x1b[1~" | "\x1b[7~" => Key::Home,
        "\x1b[F" | "\x1bOF" | "\x1b[4~" | "\x1b[8~" => Key::End,
        "\x1b[2~" => Key::Insert,
        "\x1b[3~" => Key::Delete,
        "\x1b[5~" => Key::PageUp,
        "\x1b[6~" => Key::PageDown,
        "\x1b[Z" => Key::BackTab,
        "\x1bOM" => Key::Enter,
        "\x1bOP" | "\x1b[11~" => Key::F(1),
        "\x1bOQ" | "\x1b[12~" => Key::F(2),
        "\x1bOR" | "\x1b[13~" => Key::F(3),
        "\x1bOS" | "\x1b[14~" => Key::F(4),
        "\x1b[15~" => Key::F(5),
        "\x1b[17~" => Key::F(6),
        "\x1b[18~" => Key::F(7),
        "\x1b[19~" => Key::F(8),
        "\x1b[20~" => Key::F(9),
        "\x1b[21~" => Key::F(10),
        "\x1b[23~" => Key::F(11),
        "\x1b[24~" => Key::F(12),
        _ => return None,
    };
    Some(key)
}

/// Decode a single non-escape character.
pub(crate) fn plain_char_key(ch: char) -> Option<Key> {
    match ch {
        '\r' | '\n' => Some(Key::Enter),
        '\t' => Some(Key::Tab),
        '\x7f' | '\x08' => Some(Key::Backspace),
        ch if (ch as u32) >= 1 && (ch as u32) <= 26 => {
            Some(Key::Ctrl((ch as u8 + 96) as char))
        }
        ch if !ch.is_control() => Some(Key::Char(ch)),
        _ => None,
    }
}

/// Length in bytes of the CSI sequence starting at the front of `data`, if
/// it is complete. Used to skip sequences the table does not know.
pub(crate) fn csi_sequence_len(data: &str) -> Option<usize> {
    let bytes = data.as_bytes();
    if bytes.len() < 2 || bytes[0] != 0x1b || bytes[1] != b'[' {
        return None;
    }
    for (i, byte) in bytes.iter().enumerate().skip(2) {
        if (0x40..=0x7e).contains(byte) {
            return Some(i + 1);
        }
    }
    None
}
