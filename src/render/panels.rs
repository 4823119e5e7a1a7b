//! Panel stacking.
//!
//! Windows register their surface here; the stack remembers bottom-to-top
//! order and composites visible panels onto the root frame on refresh. The
//! topmost panel wins wherever two overlap.

use crate::render::surface::{SharedSurface, Surface};

/// Stable handle to a stacked panel. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PanelId(u64);

impl PanelId {
    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

struct PanelEntry {
    id: PanelId,
    surface: SharedSurface,
    visible: bool,
}

/// Bottom-to-top ordered collection of window surfaces.
#[derive(Default)]
pub struct PanelStack {
    panels: Vec<PanelEntry>,
    next_id: u64,
}

impl PanelStack {
    pub fn new() -> Self {
        Self {
            panels: Vec::new(),
            next_id: 1,
        }
    }

    /// Push a surface on top of the stack.
    pub fn push(&mut self, surface: SharedSurface) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.panels.push(PanelEntry {
            id,
            surface,
            visible: true,
        });
        id
    }

    fn position(&self, id: PanelId) -> Option<usize> {
        self.panels.iter().position(|entry| entry.id == id)
    }

    /// Detach a panel from the stack. Returns the surface handle once;
    /// removing an unknown or already-removed id yields `None`.
    pub fn remove(&mut self, id: PanelId) -> Option<SharedSurface> {
        let index = self.position(id)?;
        Some(self.panels.remove(index).surface)
    }

    /// Move a panel to the top of the stack.
    pub fn raise(&mut self, id: PanelId) {
        if let Some(index) = self.position(id) {
            let entry = self.panels.remove(index);
            self.panels.push(entry);
        }
    }

    /// Keep the panel stacked but skip it during compositing.
    pub fn hide(&mut self, id: PanelId) {
        if let Some(index) = self.position(id) {
            self.panels[index].visible = false;
        }
    }

    pub fn show(&mut self, id: PanelId) {
        if let Some(index) = self.position(id) {
            self.panels[index].visible = true;
        }
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.position(id).is_some()
    }

    pub fn is_visible(&self, id: PanelId) -> bool {
        self.position(id)
            .map_or(false, |index| self.panels[index].visible)
    }

    /// Id of the topmost panel, visible or not.
    pub fn top(&self) -> Option<PanelId> {
        self.panels.last().map(|entry| entry.id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Blit every visible panel onto `frame`, bottom first.
    pub fn composite(&self, frame: &mut Surface) {
        for entry in &self.panels {
            if entry.visible {
                entry.surface.borrow().blit_to(frame);
            }
        }
    }
}
