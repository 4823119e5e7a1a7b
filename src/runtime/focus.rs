//! Focus chain bookkeeping.
//!
//! The chain is an ordered list of focusable widget ids, built by the owning
//! window's attach walk in tree pre-order and never shrunk (widget detach is
//! out of scope). Navigation treats it as circular and is bounded to one
//! full cycle, so an empty or fully ineligible chain terminates with `None`
//! instead of spinning.

use crate::core::widget::WidgetId;

#[derive(Debug, Default)]
pub struct FocusChain {
    entries: Vec<WidgetId>,
}

impl FocusChain {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a focusable widget. Attach order is navigation order.
    pub fn push(&mut self, id: WidgetId) {
        self.entries.push(id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.entries.contains(&id)
    }

    pub fn as_slice(&self) -> &[WidgetId] {
        &self.entries
    }

    fn position(&self, id: WidgetId) -> Option<usize> {
        self.entries.iter().position(|entry| *entry == id)
    }

    /// First eligible entry after `current`, scanning forward with wrap.
    ///
    /// When `current` is not a chain member (the window sentinel holds
    /// focus), the scan starts at the first entry. The scan visits each
    /// entry at most once; `current` itself is the last candidate, so a
    /// chain whose only eligible member is `current` yields `current` (the
    /// transition function turns that into a no-op).
    pub fn next_after<F>(&self, current: WidgetId, mut is_eligible: F) -> Option<WidgetId>
    where
        F: FnMut(WidgetId) -> bool,
    {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        let start = match self.position(current) {
            Some(index) => (index + 1) % len,
            None => 0,
        };
        for step in 0..len {
            let candidate = self.entries[(start + step) % len];
            if is_eligible(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Backward counterpart of `next_after`; not-found starts at the last
    /// entry.
    pub fn prev_before<F>(&self, current: WidgetId, mut is_eligible: F) -> Option<WidgetId>
    where
        F: FnMut(WidgetId) -> bool,
    {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        let start = match self.position(current) {
            Some(index) => (index + len - 1) % len,
            None => len - 1,
        };
        for step in 0..len {
            let candidate = self.entries[(start + len - step) % len];
            if is_eligible(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}
