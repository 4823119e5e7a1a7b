//! Top-level window: widget tree root, focus owner and input router.
//!
//! A `Window` owns its widget subtree, the focus chain built while widgets
//! attach, a screen surface the subtree is composited onto, and the panel
//! registered for that surface. Input dispatch, focus transitions and the
//! title/footer chrome all live here; per-kind behavior is supplied through
//! `WindowHooks` rather than subclassing.

use std::rc::Rc;

use unicode_width::UnicodeWidthStr;

use crate::core::geometry::Point;
use crate::core::input::Key;
use crate::core::input_event::MouseEvent;
use crate::core::keybindings::{self, KeyAction};
use crate::core::screen::Screen;
use crate::core::widget::{
    find_widget, find_widget_mut, for_each_floating, widget_at, InputVerdict, Widget, WidgetBase,
    WidgetId,
};
use crate::logging::{debug_enabled, log_debug};
use crate::render::panels::PanelId;
use crate::render::style::{ColorPair, TextStyle};
use crate::render::surface::{SharedSurface, Surface};
use crate::runtime::focus::FocusChain;

/// Screen tag used by panel managers to tell windows apart.
///
/// Purely informational: setting it has no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowKind {
    #[default]
    CallList,
    CallFlow,
    CallRaw,
    Filter,
    Save,
    ColumnSelect,
    Settings,
    Stats,
    MessageDiff,
}

/// Per-window behavior overrides.
///
/// The window detaches the hook object for the duration of each call so the
/// hook can borrow the window freely; a hook that re-enters one of these
/// operations finds no hook installed and gets the default behavior.
pub trait WindowHooks {
    /// Consulted by [`Window::redraw`] when the dirty flag is clear.
    fn redraw(&mut self, _window: &Window) -> bool {
        true
    }

    /// Called by [`Window::resize`] after the screen geometry changed.
    fn resize(&mut self, _window: &mut Window, _screen: &mut dyn Screen) {}

    /// Called by [`Window::show_help`] while input reads are blocking.
    fn help(&mut self, _window: &mut Window, _screen: &mut dyn Screen) {}
}

/// Hook set with every default left in place.
pub struct NoHooks;

impl WindowHooks for NoHooks {}

/// A realized top-level window.
pub struct Window {
    base: WidgetBase,
    kind: WindowKind,
    children: Vec<Box<dyn Widget>>,
    next_widget_id: u64,
    chain: FocusChain,
    focused: WidgetId,
    default_focus: Option<WidgetId>,
    changed: bool,
    surface: Option<SharedSurface>,
    panel: Option<PanelId>,
    monochrome: bool,
    hooks: Option<Box<dyn WindowHooks>>,
}

impl Window {
    /// Create a window of `height` x `width` cells and realize it on
    /// `screen` before returning.
    pub fn new(screen: &mut dyn Screen, height: u16, width: u16) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(height, width);
        base.set_expand(true, true);
        let mut window = Self {
            base,
            kind: WindowKind::default(),
            children: Vec::new(),
            next_widget_id: 1,
            chain: FocusChain::new(),
            focused: WidgetId::ROOT,
            default_focus: None,
            changed: true,
            surface: None,
            panel: None,
            monochrome: false,
            hooks: None,
        };
        window.realize(screen);
        window
    }

    /// Allocate the surface and panel. Idempotent.
    ///
    /// A window that does not fill an axis is centered on it; the offset is
    /// the magnitude of half the size difference, so a window larger than
    /// the screen still gets a non-negative position.
    pub fn realize(&mut self, screen: &mut dyn Screen) {
        if self.surface.is_some() {
            return;
        }
        let rows = screen.rows();
        let cols = screen.cols();
        let (height, width) = self.base.size();
        let mut row = 0;
        let mut col = 0;
        if height != rows {
            row = rows.abs_diff(height) / 2;
        }
        if width != cols {
            col = cols.abs_diff(width) / 2;
        }
        self.base.set_position(row, col);

        let surface = screen.create_surface(height, width, row, col);
        screen.set_input_blocking(false);
        screen.enable_extended_keys(true);
        let panel = screen.create_panel(&surface);
        self.monochrome = !screen.has_colors();
        self.surface = Some(surface);
        self.panel = Some(panel);

        if debug_enabled() {
            log_debug(&format!(
                "window {:?}: realized {}x{} at ({}, {})",
                self.kind, height, width, row, col
            ));
        }
    }

    /// Hide and release the panel. Extra calls are no-ops.
    pub fn finalize(&mut self, screen: &mut dyn Screen) {
        if let Some(panel) = self.panel.take() {
            screen.hide_panel(panel);
            screen.release_panel(panel);
        }
        self.surface = None;
    }

    /// Take ownership of a widget subtree, assigning ids and extending the
    /// focus chain in pre-order, and append it to the window's children.
    /// Returns the id given to the subtree root.
    pub fn attach(&mut self, mut widget: Box<dyn Widget>) -> WidgetId {
        self.register_subtree(widget.as_mut());
        let id = widget.id();
        self.children.push(widget);
        self.changed = true;
        id
    }

    fn register_subtree(&mut self, widget: &mut dyn Widget) {
        let id = WidgetId::from_raw(self.next_widget_id);
        self.next_widget_id += 1;
        widget.base_mut().set_id(id);
        if widget.can_focus() {
            self.chain.push(id);
        }
        if let Some(container) = widget.as_container_mut() {
            for child in container.children_mut() {
                self.register_subtree(child.as_mut());
            }
        }
    }

    /// Move focus to `target`.
    ///
    /// No-op when `target` already holds focus or names no attached widget.
    /// The transition order is strict: the old holder loses focus before the
    /// new holder gains it, and the ROOT sentinel receives no callbacks.
    pub fn set_focus(&mut self, target: WidgetId) {
        if target == self.focused {
            return;
        }
        if target != WidgetId::ROOT && find_widget(&self.children, target).is_none() {
            return;
        }
        let previous = self.focused;
        if previous != WidgetId::ROOT {
            if let Some(widget) = find_widget_mut(&mut self.children, previous) {
                widget.focus_lost();
            }
        }
        self.focused = target;
        if target != WidgetId::ROOT {
            if let Some(widget) = find_widget_mut(&mut self.children, target) {
                widget.focus_gained();
            }
        }
        if debug_enabled() {
            log_debug(&format!(
                "window {:?}: focus {} -> {}",
                self.kind,
                previous.raw(),
                target.raw()
            ));
        }
    }

    /// Widget-initiated focus request.
    pub fn grab_focus(&mut self, target: WidgetId) {
        self.set_focus(target);
    }

    /// Widget-initiated focus release: only honored while `id` holds focus.
    /// Focus falls back to the default-focus widget, or to the window itself
    /// when none is configured or the releasing widget is the default.
    pub fn release_focus(&mut self, id: WidgetId) {
        if self.focused != id {
            return;
        }
        match self.default_focus {
            Some(default) if default != id => self.set_focus(default),
            _ => self.set_focus(WidgetId::ROOT),
        }
    }

    /// Record `id` as the default-focus widget and grant it focus now.
    pub fn set_default_focus(&mut self, id: WidgetId) {
        self.default_focus = Some(id);
        self.set_focus(id);
    }

    /// Return focus to the default-focus widget, or to the window itself
    /// when none is configured.
    pub fn focus_default(&mut self) {
        match self.default_focus {
            Some(default) => self.set_focus(default),
            None => self.set_focus(WidgetId::ROOT),
        }
    }

    /// Advance focus to the next visible chain member. Reports whether a
    /// target was found; focus is untouched otherwise.
    pub fn focus_next(&mut self) -> bool {
        let children = &self.children;
        let target = self.chain.next_after(self.focused, |id| {
            find_widget(children, id).map_or(false, |w| w.is_visible())
        });
        match target {
            Some(id) => {
                self.set_focus(id);
                true
            }
            None => false,
        }
    }

    /// Move focus to the previous visible chain member.
    pub fn focus_prev(&mut self) -> bool {
        let children = &self.children;
        let target = self.chain.prev_before(self.focused, |id| {
            find_widget(children, id).map_or(false, |w| w.is_visible())
        });
        match target {
            Some(id) => {
                self.set_focus(id);
                true
            }
            None => false,
        }
    }

    /// Route a key press.
    ///
    /// Field-navigation actions are resolved here and never reach widgets;
    /// every other key goes to the focused widget. Either way the window is
    /// marked dirty.
    pub fn handle_key(&mut self, key: Key) -> InputVerdict {
        self.changed = true;
        match keybindings::find_action(key) {
            Some(KeyAction::NextField) => {
                self.focus_next();
                InputVerdict::Handled
            }
            Some(KeyAction::PrevField) => {
                self.focus_prev();
                InputVerdict::Handled
            }
            _ => {
                if self.focused == WidgetId::ROOT {
                    return InputVerdict::Unhandled;
                }
                match find_widget_mut(&mut self.children, self.focused) {
                    Some(widget) => widget.key_pressed(key),
                    None => InputVerdict::Unhandled,
                }
            }
        }
    }

    /// Route a mouse event to the deepest visible widget under it.
    ///
    /// A hit widget receives focus and then the click; a miss is absorbed
    /// with focus unchanged. The window is marked dirty either way.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> InputVerdict {
        self.changed = true;
        match widget_at(&self.children, event.point) {
            Some(id) => {
                self.set_focus(id);
                match find_widget_mut(&mut self.children, id) {
                    Some(widget) => widget.clicked(event),
                    None => InputVerdict::Unhandled,
                }
            }
            None => InputVerdict::Handled,
        }
    }

    /// Whether the window needs to be drawn again.
    ///
    /// The dirty flag is consumed and wins unconditionally; otherwise the
    /// hook decides (windows without hooks always redraw).
    pub fn redraw(&mut self) -> bool {
        if self.changed {
            self.changed = false;
            return true;
        }
        let mut hooks = match self.hooks.take() {
            Some(hooks) => hooks,
            None => return true,
        };
        let verdict = hooks.redraw(self);
        self.hooks = Some(hooks);
        verdict
    }

    /// React to a screen geometry change. Hook only.
    pub fn resize(&mut self, screen: &mut dyn Screen) {
        if let Some(mut hooks) = self.hooks.take() {
            hooks.resize(self, screen);
            self.hooks = Some(hooks);
        }
    }

    /// Run the help hook with blocking input reads, restoring non-blocking
    /// reads before returning.
    pub fn show_help(&mut self, screen: &mut dyn Screen) {
        screen.set_input_blocking(true);
        if let Some(mut hooks) = self.hooks.take() {
            hooks.help(self, screen);
            self.hooks = Some(hooks);
        }
        screen.set_input_blocking(false);
    }

    /// Render the widget tree onto the window surface.
    ///
    /// Three passes: draw every visible widget into its own buffer, map the
    /// buffers onto the surface in tree order, then map floating widgets
    /// again so they end up above the regular layout regardless of depth.
    pub fn draw(&mut self) {
        let surface = match &self.surface {
            Some(surface) => Rc::clone(surface),
            None => return,
        };
        let mut target = surface.borrow_mut();
        for child in &mut self.children {
            draw_subtree(child.as_mut());
        }
        for child in &self.children {
            map_subtree(child.as_ref(), &mut target);
        }
        for_each_floating(&self.children, &mut |widget| {
            map_subtree(widget, &mut target);
        });
    }

    /// Draw `title` centered on the top row over a title-bar band.
    pub fn set_title(&mut self, title: &str) {
        let surface = match &self.surface {
            Some(surface) => Rc::clone(surface),
            None => return,
        };
        let mut surface = surface.borrow_mut();
        let mut style = TextStyle::with_pair(ColorPair::TitleBar).bold();
        if self.monochrome {
            style = style.reverse();
        }
        surface.set_style(style);
        surface.clear_line(0);
        let col = surface.width().saturating_sub(title.width() as u16) / 2;
        surface.write_text(0, col, title);
        surface.reset_style();
    }

    /// Blank a full row in the surface's current style, so callers can
    /// paint a background band by setting attributes first.
    pub fn clear_line(&mut self, row: u16) {
        if let Some(surface) = &self.surface {
            surface.borrow_mut().clear_line(row);
        }
    }

    /// Draw the key/description legend on the bottom row.
    ///
    /// Each key label is followed by one padding cell in the key style and
    /// each description by one padding cell in its own style plus two cells
    /// of bare footer band.
    pub fn draw_bindings(&mut self, bindings: &[(&str, &str)]) {
        let surface = match &self.surface {
            Some(surface) => Rc::clone(surface),
            None => return,
        };
        let mut surface = surface.borrow_mut();
        let mono = self.monochrome;
        let styled = |style: TextStyle| if mono { style.reverse() } else { style };

        let row = surface.height().saturating_sub(1);
        surface.set_style(styled(TextStyle::with_pair(ColorPair::FooterBar)));
        surface.clear_line(row);

        let mut col: u16 = 0;
        for &(key, description) in bindings {
            surface.set_style(styled(TextStyle::with_pair(ColorPair::FooterKey).bold()));
            surface.write_text(row, col, key);
            let key_width = key.width() as u16;
            surface.write_text(row, col.saturating_add(key_width), " ");
            col = col.saturating_add(key_width).saturating_add(1);

            surface.set_style(styled(TextStyle::with_pair(ColorPair::FooterText)));
            surface.write_text(row, col, description);
            let description_width = description.width() as u16;
            surface.write_text(row, col.saturating_add(description_width), " ");
            col = col.saturating_add(description_width).saturating_add(3);
        }
        surface.reset_style();
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: WindowKind) {
        self.kind = kind;
    }

    pub fn set_hooks(&mut self, hooks: Box<dyn WindowHooks>) {
        self.hooks = Some(hooks);
    }

    pub fn width(&self) -> u16 {
        self.base.rect().width
    }

    pub fn height(&self) -> u16 {
        self.base.rect().height
    }

    /// Screen position assigned at realize time.
    pub fn position(&self) -> Point {
        self.base.position()
    }

    /// Id of the focus holder; `WidgetId::ROOT` when the window itself
    /// holds focus.
    pub fn focused(&self) -> WidgetId {
        self.focused
    }

    /// The focused widget, or `None` while the sentinel holds focus.
    pub fn focused_widget(&self) -> Option<&dyn Widget> {
        if self.focused == WidgetId::ROOT {
            return None;
        }
        find_widget(&self.children, self.focused)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        find_widget(&self.children, id)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        find_widget_mut(&mut self.children, id)
    }

    /// Focusable widget ids in attach pre-order.
    pub fn focus_chain(&self) -> &[WidgetId] {
        self.chain.as_slice()
    }

    pub fn surface(&self) -> Option<&SharedSurface> {
        self.surface.as_ref()
    }

    pub fn panel(&self) -> Option<PanelId> {
        self.panel
    }

    pub fn is_realized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_monochrome(&self) -> bool {
        self.monochrome
    }
}

fn draw_subtree(widget: &mut dyn Widget) {
    if !widget.is_visible() {
        return;
    }
    widget.realize();
    widget.draw();
    if let Some(container) = widget.as_container_mut() {
        for child in container.children_mut() {
            draw_subtree(child.as_mut());
        }
    }
}

fn map_subtree(widget: &dyn Widget, target: &mut Surface) {
    if !widget.is_visible() {
        return;
    }
    widget.map(target);
    if let Some(container) = widget.as_container() {
        for child in container.children() {
            map_subtree(child.as_ref(), target);
        }
    }
}
