//! Unix terminal screen.
//!
//! `TermScreen` owns the tty for the lifetime of the value: raw mode on
//! construction, alternate screen and hidden cursor while active, and a
//! full restore on `close` or drop. Reads are synchronous; the blocking
//! switch maps to `VMIN`, and SIGWINCH is latched through a flag that
//! `read_input` turns into a resize event. `refresh` composites the panel
//! stack into one frame and writes it as ANSI.

use std::env;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use libc::{self, c_int};
use signal_hook::SigId;

use crate::config::EnvConfig;
use crate::core::input::MAX_SEQUENCE_LEN;
use crate::core::input_event::{parse_input_events, InputEvent};
use crate::core::screen::Screen;
use crate::render::panels::{PanelId, PanelStack};
use crate::render::style::{ColorPair, TextStyle};
use crate::render::surface::{SharedSurface, Surface};

const ENTER_SCREEN: &str = "\x1b[?1049h\x1b[?25l\x1b[2J";
const LEAVE_SCREEN: &str = "\x1b[2J\x1b[?25h\x1b[?1049l";
const KEYPAD_ON: &str = "\x1b[?1h\x1b=";
const KEYPAD_OFF: &str = "\x1b[?1l\x1b>";
const MOUSE_ON: &str = "\x1b[?1000h\x1b[?1006h";
const MOUSE_OFF: &str = "\x1b[?1006l\x1b[?1000l";

fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

fn wait_writable(fd: c_int) -> io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result == 0 {
            // Infinite timeout should not return 0, but avoid a tight loop if it does.
            continue;
        }
        if (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }

        return Err(io::Error::other(format!(
            "poll(POLLOUT) returned revents=0x{:x}",
            fds.revents
        )));
    }
}

fn write_all_fd_with<FWrite, FWait>(
    fd: c_int,
    bytes: &[u8],
    mut write_once: FWrite,
    mut wait_writable: FWait,
) -> io::Result<()>
where
    FWrite: FnMut(c_int, &[u8]) -> io::Result<usize>,
    FWait: FnMut(c_int) -> io::Result<()>,
{
    let mut written = 0;
    while written < bytes.len() {
        match write_once(fd, &bytes[written..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "write returned 0",
                ));
            }
            Ok(count) => {
                let remaining = bytes.len() - written;
                if count > remaining {
                    return Err(io::Error::other(
                        "write returned more bytes than requested",
                    ));
                }
                written += count;
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                continue;
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                wait_writable(fd)?;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn write_fd(fd: c_int, data: &str) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    write_all_fd_with(
        fd,
        data.as_bytes(),
        |fd, buf| {
            let result = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
            if result < 0 {
                Err(io::Error::last_os_error())
            } else {
                Ok(result as usize)
            }
        },
        wait_writable,
    )
}

fn detect_colors(config: &EnvConfig) -> bool {
    if config.monochrome {
        return false;
    }
    if matches!(env::var_os("NO_COLOR"), Some(value) if !value.is_empty()) {
        return false;
    }
    match env::var_os("TERM") {
        Some(term) => !term.is_empty() && term != "dumb",
        None => false,
    }
}

/// Bytes at the buffer tail that form an unterminated control sequence and
/// must wait for the next read. A lone trailing ESC is not held back; it
/// decodes as the escape key.
fn incomplete_escape_suffix(bytes: &[u8]) -> usize {
    let escape_at = match bytes.iter().rposition(|&b| b == 0x1b) {
        Some(position) => position,
        None => return 0,
    };
    // Cap generously: SGR mouse reports carry three numeric parameters.
    let tail = &bytes[escape_at..];
    if tail.len() < 2 || tail.len() > MAX_SEQUENCE_LEN + 16 {
        return 0;
    }
    if tail[1] == b'[' && tail[2..].iter().all(|&b| (0x20..=0x3f).contains(&b)) {
        return tail.len();
    }
    // SS3 function and cursor keys (ESC O x) carry exactly one final byte.
    if tail.len() == 2 && tail[1] == b'O' {
        return 2;
    }
    0
}

/// Bytes at the buffer tail that start a multi-byte character whose
/// remainder has not arrived yet.
fn incomplete_utf8_suffix(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Ok(_) => 0,
        Err(err) if err.error_len().is_none() => bytes.len() - err.valid_up_to(),
        Err(_) => 0,
    }
}

fn sgr_sequence(style: TextStyle, colors: bool) -> String {
    let mut codes = vec!["0"];
    if style.bold {
        codes.push("1");
    }
    if style.underline {
        codes.push("4");
    }
    if style.reverse {
        codes.push("7");
    }
    if colors {
        match style.pair {
            ColorPair::Default => {}
            ColorPair::TitleBar => codes.extend(["39", "44"]),
            ColorPair::FooterBar => codes.extend(["39", "46"]),
            ColorPair::FooterKey => codes.extend(["37", "46"]),
            ColorPair::FooterText => codes.extend(["30", "46"]),
        }
    }
    format!("\x1b[{}m", codes.join(";"))
}

/// Serialize a composited frame as ANSI: home, then every row addressed
/// explicitly with style changes coalesced into runs.
fn frame_to_ansi(frame: &Surface, colors: bool) -> String {
    let mut out = String::from("\x1b[H");
    for row in 0..frame.height() {
        out.push_str(&format!("\x1b[{};1H", row + 1));
        let mut current: Option<TextStyle> = None;
        for col in 0..frame.width() {
            let cell = match frame.cell(row, col) {
                Some(cell) => cell,
                None => continue,
            };
            if cell.is_continuation() {
                continue;
            }
            if current != Some(cell.style) {
                out.push_str(&sgr_sequence(cell.style, colors));
                current = Some(cell.style);
            }
            out.push_str(&cell.symbol);
        }
    }
    out.push_str("\x1b[0m");
    out
}

pub struct TermScreen {
    input_fd: c_int,
    output_fd: c_int,
    original_termios: Option<libc::termios>,
    panels: PanelStack,
    pending: Vec<u8>,
    blocking: bool,
    colors: bool,
    mouse_enabled: bool,
    extended_keys: bool,
    winch_flag: Arc<AtomicBool>,
    winch_id: Option<SigId>,
    active: bool,
}

impl TermScreen {
    /// Take over the process tty: raw mode, alternate screen, hidden
    /// cursor. `close` (or drop) undoes all of it.
    pub fn new() -> io::Result<Self> {
        Self::on_fds(libc::STDIN_FILENO, libc::STDOUT_FILENO)
    }

    fn on_fds(input_fd: c_int, output_fd: c_int) -> io::Result<Self> {
        let config = EnvConfig::from_env();
        let mut screen = Self {
            input_fd,
            output_fd,
            original_termios: None,
            panels: PanelStack::new(),
            pending: Vec::new(),
            blocking: false,
            colors: detect_colors(&config),
            mouse_enabled: !config.no_mouse,
            extended_keys: false,
            winch_flag: Arc::new(AtomicBool::new(false)),
            winch_id: None,
            active: false,
        };
        screen.open()?;
        Ok(screen)
    }

    fn open(&mut self) -> io::Result<()> {
        self.enter_raw_mode()?;
        let id = signal_hook::flag::register(libc::SIGWINCH, Arc::clone(&self.winch_flag))?;
        self.winch_id = Some(id);
        write_fd(self.output_fd, ENTER_SCREEN)?;
        self.active = true;
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> io::Result<()> {
        let original = match self.original_termios {
            Some(termios) => termios,
            None => {
                let termios = get_termios(self.input_fd)?;
                self.original_termios = Some(termios);
                termios
            }
        };
        let mut raw = original;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG);
        raw.c_iflag &= !(libc::IXON | libc::ICRNL);
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 0;
        set_termios(self.input_fd, &raw)
    }

    /// Restore the tty. Safe to call more than once.
    pub fn close(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut restore = String::new();
        if self.extended_keys {
            if self.mouse_enabled {
                restore.push_str(MOUSE_OFF);
            }
            restore.push_str(KEYPAD_OFF);
        }
        restore.push_str(LEAVE_SCREEN);
        let write_result = write_fd(self.output_fd, &restore);

        if let Some(id) = self.winch_id.take() {
            signal_hook::low_level::unregister(id);
        }
        // Flush unread input before leaving raw mode so buffered bytes do
        // not leak to the shell.
        let _ = unsafe { libc::tcflush(self.input_fd, libc::TCIFLUSH) };
        let restore_result = match self.original_termios.take() {
            Some(original) => set_termios(self.input_fd, &original),
            None => Ok(()),
        };
        write_result.and(restore_result)
    }

    fn write(&mut self, data: &str) -> io::Result<()> {
        write_fd(self.output_fd, data)
    }

    fn drain_pending_bytes(&mut self) {
        let mut buffer = [0u8; 4096];
        loop {
            let read_len = unsafe {
                libc::read(
                    self.input_fd,
                    buffer.as_mut_ptr() as *mut libc::c_void,
                    buffer.len(),
                )
            };
            if read_len > 0 {
                self.pending.extend_from_slice(&buffer[..read_len as usize]);
                if read_len as usize == buffer.len() {
                    continue;
                }
                break;
            }
            if read_len < 0 {
                let err = io::Error::last_os_error();
                // A signal (usually SIGWINCH) interrupted a blocking read;
                // the flag check below picks it up.
                if err.kind() == io::ErrorKind::Interrupted {
                    break;
                }
            }
            break;
        }
    }

    fn take_decodable(&mut self) -> Option<String> {
        let mut end = self.pending.len() - incomplete_escape_suffix(&self.pending);
        end -= incomplete_utf8_suffix(&self.pending[..end]);
        if end == 0 {
            return None;
        }
        let text = String::from_utf8_lossy(&self.pending[..end]).into_owned();
        self.pending.drain(..end);
        Some(text)
    }
}

impl Drop for TermScreen {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl Screen for TermScreen {
    fn rows(&self) -> u16 {
        read_winsize(self.output_fd).map(|(_, rows)| rows).unwrap_or(24)
    }

    fn cols(&self) -> u16 {
        read_winsize(self.output_fd).map(|(cols, _)| cols).unwrap_or(80)
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
        if self.blocking == blocking {
            return;
        }
        self.blocking = blocking;
        if let Ok(mut termios) = get_termios(self.input_fd) {
            termios.c_cc[libc::VMIN] = if blocking { 1 } else { 0 };
            termios.c_cc[libc::VTIME] = 0;
            let _ = set_termios(self.input_fd, &termios);
        }
    }

    fn is_input_blocking(&self) -> bool {
        self.blocking
    }

    fn enable_extended_keys(&mut self, enabled: bool) {
        if self.extended_keys == enabled {
            return;
        }
        self.extended_keys = enabled;
        let mut sequence = String::new();
        if enabled {
            sequence.push_str(KEYPAD_ON);
            if self.mouse_enabled {
                sequence.push_str(MOUSE_ON);
            }
        } else {
            if self.mouse_enabled {
                sequence.push_str(MOUSE_OFF);
            }
            sequence.push_str(KEYPAD_OFF);
        }
        let _ = write_fd(self.output_fd, &sequence);
    }

    fn read_input(&mut self) -> Vec<InputEvent> {
        if !self.active {
            return Vec::new();
        }
        self.drain_pending_bytes();

        let mut events = Vec::new();
        if self.winch_flag.swap(false, Ordering::Relaxed) {
            events.push(InputEvent::Resize {
                columns: self.cols(),
                rows: self.rows(),
            });
        }
        if let Some(text) = self.take_decodable() {
            events.extend(parse_input_events(&text));
        }
        events
    }

    fn refresh(&mut self) -> io::Result<()> {
        let mut frame = Surface::new(self.rows(), self.cols(), 0, 0);
        self.panels.composite(&mut frame);
        let ansi = frame_to_ansi(&frame, self.colors);
        self.write(&ansi)
    }
}
