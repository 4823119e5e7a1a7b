//! Rendering: cell surfaces, styles and the panel stack.

pub mod panels;
pub mod style;
pub mod surface;

pub use surface::{SharedSurface, Surface};
