use crate::{foundation::core::Millis, page::surface::Page};

/// Why native scrolling is suppressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    Loading,
    Expansion,
}

/// Ownership record for the page's scroll suppression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ScrollLockToken {
    pub reason: LockReason,
    pub acquired_at: Millis,
}

/// Exclusive owner of the page's scroll-suppression style.
///
/// Acquisition is not nested: acquiring while held is a no-op and keeps the
/// current token. [`ScrollLock::release`] is the only path that clears the
/// style, and clears it exactly once per acquisition.
#[derive(Debug, Default)]
pub struct ScrollLock {
    held: Option<ScrollLockToken>,
    acquisitions: u64,
    releases: u64,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this call took the lock.
    pub fn acquire<P: Page + ?Sized>(
        &mut self,
        reason: LockReason,
        now: Millis,
        page: &mut P,
    ) -> bool {
        if let Some(token) = self.held {
            tracing::trace!(?reason, held = ?token.reason, "scroll lock already held");
            return false;
        }
        page.set_scroll_suppressed(true);
        self.held = Some(ScrollLockToken {
            reason,
            acquired_at: now,
        });
        self.acquisitions += 1;
        tracing::debug!(?reason, at = now.0, "scroll lock acquired");
        true
    }

    /// Returns the released token, or `None` if the lock was free.
    pub fn release<P: Page + ?Sized>(&mut self, page: &mut P) -> Option<ScrollLockToken> {
        let token = self.held.take()?;
        page.set_scroll_suppressed(false);
        self.releases += 1;
        tracing::debug!(reason = ?token.reason, "scroll lock released");
        Some(token)
    }

    pub fn token(&self) -> Option<ScrollLockToken> {
        self.held
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    pub fn acquisitions(&self) -> u64 {
        self.acquisitions
    }

    pub fn releases(&self) -> u64 {
        self.releases
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lock/scroll_lock.rs"]
mod tests;
