//! Push button.

use unicode_width::UnicodeWidthStr;

use crate::core::input::Key;
use crate::core::input_event::MouseEvent;
use crate::core::keybindings::{self, KeyAction};
use crate::core::widget::{InputVerdict, Widget, WidgetBase};
use crate::render::style::TextStyle;

/// Focusable activation widget rendered as `[ text ]`, reverse-video while
/// focused. Confirm/Select keys and left clicks fire the activate callback.
pub struct Button {
    base: WidgetBase,
    text: String,
    on_activate: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut base = WidgetBase::new();
        base.set_size(1, text.width() as u16 + 4);
        Self {
            base,
            text,
            on_activate: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let width = self.text.width() as u16 + 4;
        let height = self.base.rect().height.max(1);
        self.base.set_size(height, width);
    }

    pub fn set_on_activate(&mut self, handler: Option<Box<dyn FnMut()>>) {
        self.on_activate = handler;
    }

    fn activate(&mut self) {
        if let Some(handler) = self.on_activate.as_mut() {
            handler();
        }
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn draw(&mut self) {
        let mut style = TextStyle::plain();
        if self.base.is_focused() {
            style = style.reverse();
        }
        let rendered = format!("[ {} ]", self.text);
        if let Some(buffer) = self.base.buffer_mut() {
            buffer.set_style(style);
            buffer.clear();
            buffer.write_text(0, 0, &rendered);
        }
    }

    fn key_pressed(&mut self, key: Key) -> InputVerdict {
        match keybindings::find_action(key) {
            Some(KeyAction::Confirm) | Some(KeyAction::Select) => {
                self.activate();
                InputVerdict::Handled
            }
            _ => InputVerdict::Unhandled,
        }
    }

    fn clicked(&mut self, event: MouseEvent) -> InputVerdict {
        if event.is_left_click() {
            self.activate();
            return InputVerdict::Handled;
        }
        InputVerdict::Unhandled
    }
}
