//! Runtime: focus chains and windows.

pub mod focus;
pub mod window;

pub use window::{Window, WindowHooks, WindowKind};
