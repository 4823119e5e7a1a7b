//! Widget and container contracts.
//!
//! Everything a window can hold implements `Widget`; widgets that own
//! children additionally implement `Container` and surface it through the
//! `as_container` hooks so tree walks stay dynamic-dispatch only. Windows
//! refer to widgets by id, never by pointer: the tree owns its nodes and ids
//! are resolved by searching it.

use crate::core::geometry::{Point, Rect};
use crate::core::input::Key;
use crate::core::input_event::MouseEvent;
use crate::render::surface::Surface;

/// Stable per-window widget handle.
///
/// `ROOT` names the owning window itself (the focus sentinel); attached
/// widgets get ids from the window's allocator starting at 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct WidgetId(u64);

impl WidgetId {
    pub const ROOT: WidgetId = WidgetId(0);

    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Outcome of offering an input event to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputVerdict {
    /// The widget consumed the event.
    Handled,
    /// The widget ignored the event.
    Unhandled,
    /// The widget asks the caller to keep routing the event upward.
    Propagate,
}

/// Shared widget state embedded in every concrete widget.
#[derive(Debug)]
pub struct WidgetBase {
    id: WidgetId,
    rect: Rect,
    visible: bool,
    focused: bool,
    floating: bool,
    hexpand: bool,
    vexpand: bool,
    buffer: Option<Surface>,
}

impl WidgetBase {
    pub fn new() -> Self {
        Self {
            id: WidgetId::ROOT,
            rect: Rect::new(0, 0, 0, 0),
            visible: true,
            focused: false,
            floating: false,
            hexpand: false,
            vexpand: false,
            buffer: None,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Assigned by the owning window during the attach walk.
    pub fn set_id(&mut self, id: WidgetId) {
        self.id = id;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn position(&self) -> Point {
        Point::new(self.rect.col, self.rect.row)
    }

    pub fn set_position(&mut self, row: u16, col: u16) {
        self.rect.row = row;
        self.rect.col = col;
        if let Some(buffer) = &mut self.buffer {
            buffer.set_position(row, col);
        }
    }

    /// (height, width), matching the construction argument order.
    pub fn size(&self) -> (u16, u16) {
        (self.rect.height, self.rect.width)
    }

    pub fn set_size(&mut self, height: u16, width: u16) {
        self.rect.height = height;
        self.rect.width = width;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_floating(&self) -> bool {
        self.floating
    }

    pub fn set_floating(&mut self, floating: bool) {
        self.floating = floating;
    }

    pub fn hexpand(&self) -> bool {
        self.hexpand
    }

    pub fn vexpand(&self) -> bool {
        self.vexpand
    }

    pub fn set_expand(&mut self, hexpand: bool, vexpand: bool) {
        self.hexpand = hexpand;
        self.vexpand = vexpand;
    }

    /// Realization at the widget level: size the owned buffer to the rect.
    ///
    /// Reallocates only when the size changed; a position-only move keeps
    /// the buffer contents and just repins it.
    pub fn ensure_buffer(&mut self) {
        let needs_alloc = match &self.buffer {
            Some(buffer) => {
                buffer.height() != self.rect.height || buffer.width() != self.rect.width
            }
            None => true,
        };
        if needs_alloc {
            self.buffer = Some(Surface::new(
                self.rect.height,
                self.rect.width,
                self.rect.row,
                self.rect.col,
            ));
        } else if let Some(buffer) = &mut self.buffer {
            buffer.set_position(self.rect.row, self.rect.col);
        }
    }

    pub fn buffer(&self) -> Option<&Surface> {
        self.buffer.as_ref()
    }

    pub fn buffer_mut(&mut self) -> Option<&mut Surface> {
        self.buffer.as_mut()
    }
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

/// The polymorphic widget contract.
pub trait Widget {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    fn id(&self) -> WidgetId {
        self.base().id()
    }

    fn rect(&self) -> Rect {
        self.base().rect()
    }

    fn position(&self) -> Point {
        self.base().position()
    }

    fn set_position(&mut self, row: u16, col: u16) {
        self.base_mut().set_position(row, col);
    }

    fn size(&self) -> (u16, u16) {
        self.base().size()
    }

    fn set_size(&mut self, height: u16, width: u16) {
        self.base_mut().set_size(height, width);
    }

    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    fn show(&mut self) {
        self.base_mut().set_visible(true);
    }

    fn hide(&mut self) {
        self.base_mut().set_visible(false);
    }

    fn is_floating(&self) -> bool {
        self.base().is_floating()
    }

    fn is_focused(&self) -> bool {
        self.base().is_focused()
    }

    /// Whether this widget participates in the focus chain.
    fn can_focus(&self) -> bool {
        false
    }

    /// Allocate whatever the widget needs to draw. Idempotent.
    fn realize(&mut self) {
        self.base_mut().ensure_buffer();
    }

    /// Render into the widget's own buffer.
    fn draw(&mut self) {}

    /// Blit the widget's buffer onto `target` at its screen position.
    fn map(&self, target: &mut Surface) {
        if let Some(buffer) = self.base().buffer() {
            buffer.blit_to(target);
        }
    }

    fn key_pressed(&mut self, _key: Key) -> InputVerdict {
        InputVerdict::Unhandled
    }

    fn clicked(&mut self, _event: MouseEvent) -> InputVerdict {
        InputVerdict::Unhandled
    }

    fn focus_gained(&mut self) {
        self.base_mut().set_focused(true);
    }

    fn focus_lost(&mut self) {
        self.base_mut().set_focused(false);
    }

    /// Container behavior for widgets that own children.
    fn as_container(&self) -> Option<&dyn Container> {
        None
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        None
    }
}

/// A widget owning an ordered list of child widgets.
pub trait Container: Widget {
    fn children(&self) -> &[Box<dyn Widget>];
    fn children_mut(&mut self) -> &mut [Box<dyn Widget>];

    /// Base add behavior: take ownership and append to the child list.
    fn attach(&mut self, child: Box<dyn Widget>);
}

/// Find a widget by id anywhere under `children`, pre-order.
pub fn find_widget(children: &[Box<dyn Widget>], id: WidgetId) -> Option<&dyn Widget> {
    for child in children {
        if child.id() == id {
            return Some(child.as_ref());
        }
        if let Some(container) = child.as_container() {
            if let Some(found) = find_widget(container.children(), id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn find_widget_mut(
    children: &mut [Box<dyn Widget>],
    id: WidgetId,
) -> Option<&mut dyn Widget> {
    for child in children {
        if child.id() == id {
            return Some(child.as_mut());
        }
        if let Some(container) = child.as_container_mut() {
            if let Some(found) = find_widget_mut(container.children_mut(), id) {
                return Some(found);
            }
        }
    }
    None
}

/// Deepest visible widget covering `point`.
///
/// Later siblings are drawn on top, so they are probed first.
pub fn widget_at(children: &[Box<dyn Widget>], point: Point) -> Option<WidgetId> {
    for child in children.iter().rev() {
        if !child.is_visible() || !child.rect().contains(point) {
            continue;
        }
        if let Some(container) = child.as_container() {
            if let Some(hit) = widget_at(container.children(), point) {
                return Some(hit);
            }
        }
        return Some(child.id());
    }
    None
}

/// Visit every floating widget anywhere under `children`, independent of the
/// normal layout order.
pub fn for_each_floating(children: &[Box<dyn Widget>], f: &mut dyn FnMut(&dyn Widget)) {
    for child in children {
        if child.is_floating() {
            f(child.as_ref());
        }
        if let Some(container) = child.as_container() {
            for_each_floating(container.children(), f);
        }
    }
}
