use crate::foundation::error::{RevealError, RevealResult};

pub use kurbo::{Point, Rect, Size};

/// Viewport size in CSS pixels.
pub type Viewport = Size;

/// Timestamp on the controller clock, in milliseconds.
///
/// The clock is supplied by the host (`performance.now()`, a test counter, a
/// trace) and never runs backwards inside the scheduler.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// The clock origin.
    pub const ZERO: Self = Self(0);

    /// Timestamp `ms` milliseconds after `self`, saturating at `u64::MAX`.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero if `earlier` is later).
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Check that a viewport has finite, positive dimensions.
pub fn validate_viewport(viewport: Viewport) -> RevealResult<Viewport> {
    if !(viewport.width.is_finite() && viewport.height.is_finite()) {
        return Err(RevealError::validation("viewport size must be finite"));
    }
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Err(RevealError::validation("viewport size must be > 0"));
    }
    Ok(viewport)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
