//! Static single-line text.

use unicode_width::UnicodeWidthStr;

use crate::core::widget::{Widget, WidgetBase};
use crate::render::style::TextStyle;

/// Non-focusable text widget. Draws its text left-aligned in an optional
/// fixed style; text wider than the widget is clipped.
pub struct Label {
    base: WidgetBase,
    text: String,
    style: Option<TextStyle>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut base = WidgetBase::new();
        base.set_size(1, text.width() as u16);
        Self {
            base,
            text,
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        let mut label = Self::new(text);
        label.style = Some(style);
        label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_style(&mut self, style: Option<TextStyle>) {
        self.style = style;
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn draw(&mut self) {
        let style = self.style.unwrap_or_default();
        let text = self.text.clone();
        if let Some(buffer) = self.base.buffer_mut() {
            buffer.set_style(style);
            buffer.clear();
            buffer.write_text(0, 0, &text);
        }
    }
}
