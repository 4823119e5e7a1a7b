//! Plain grouping container.

use crate::core::widget::{Container, Widget, WidgetBase};

/// A widget that only holds children. Its buffer is an opaque blank
/// background, so a floating pane covers whatever it overlaps while its
/// children draw on top.
///
/// Build the subtree first: children added after the pane was handed to a
/// window never get registered with that window.
pub struct Pane {
    base: WidgetBase,
    children: Vec<Box<dyn Widget>>,
}

impl Pane {
    pub fn new(height: u16, width: u16) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(height, width);
        Self {
            base,
            children: Vec::new(),
        }
    }
}

impl Widget for Pane {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn as_container(&self) -> Option<&dyn Container> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        Some(self)
    }
}

impl Container for Pane {
    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn attach(&mut self, child: Box<dyn Widget>) {
        self.children.push(child);
    }
}
