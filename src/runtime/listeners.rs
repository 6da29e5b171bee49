/// Event kinds a component can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Scroll,
    Wheel,
    TouchStart,
    TouchMove,
    KeyDown,
    PointerDown,
    Click,
    Resize,
    Visibility,
}

/// Component that owns a listener registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Dismissal,
    Hint,
    Expansion,
    Viewport,
    Controller,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug)]
struct Entry {
    id: ListenerId,
    owner: Owner,
    kind: EventKind,
}

/// Listener table shared by all components.
///
/// An owner holds at most one registration per event kind: adding a kind the
/// owner already listens to replaces the old registration.
#[derive(Debug, Default)]
pub struct Listeners {
    next: u64,
    entries: Vec<Entry>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, owner: Owner, kind: EventKind) -> ListenerId {
        self.entries
            .retain(|e| !(e.owner == owner && e.kind == kind));
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push(Entry { id, owner, kind });
        id
    }

    /// Drop every registration of `owner`, then register `kinds`.
    pub fn replace_owner(&mut self, owner: Owner, kinds: &[EventKind]) {
        self.remove_owner(owner);
        for kind in kinds {
            self.add(owner, *kind);
        }
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    pub fn remove_owner(&mut self, owner: Owner) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.owner != owner);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Owners listening to `kind`, in registration order.
    pub fn owners_for(&self, kind: EventKind) -> Vec<Owner> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.owner)
            .collect()
    }

    pub fn is_listening(&self, owner: Owner, kind: EventKind) -> bool {
        self.entries
            .iter()
            .any(|e| e.owner == owner && e.kind == kind)
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn count_owner(&self, owner: Owner) -> usize {
        self.entries.iter().filter(|e| e.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/listeners.rs"]
mod tests;
