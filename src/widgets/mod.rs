//! Concrete widgets.

pub mod button;
pub mod label;
pub mod pane;

pub use button::Button;
pub use label::Label;
pub use pane::Pane;
