use crate::runtime::listeners::{EventKind, Listeners, Owner};

/// Hides the "click & drag to interact" hint on the first pointer or touch
/// interaction, once.
#[derive(Debug, Default)]
pub struct HintLatch {
    dismissed: bool,
}

impl HintLatch {
    pub const LISTENS: [EventKind; 2] = [EventKind::PointerDown, EventKind::TouchStart];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, listeners: &mut Listeners) {
        if !self.dismissed {
            listeners.replace_owner(Owner::Hint, &Self::LISTENS);
        }
    }

    /// Returns `true` the first time only.
    pub fn on_interaction(&mut self, listeners: &mut Listeners) -> bool {
        if self.dismissed {
            return false;
        }
        self.dismissed = true;
        listeners.remove_owner(Owner::Hint);
        true
    }

    pub fn detach(&mut self, listeners: &mut Listeners) {
        listeners.remove_owner(Owner::Hint);
    }

    pub fn reset(&mut self) {
        self.dismissed = false;
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }
}
