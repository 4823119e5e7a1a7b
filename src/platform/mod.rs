//! Screen implementations.

pub mod headless;
#[cfg(unix)]
pub mod term_screen;

pub use headless::HeadlessScreen;
#[cfg(unix)]
pub use term_screen::TermScreen;
