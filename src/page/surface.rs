use crate::{
    animation::{ease::Ease, timeline::FrameStyle},
    foundation::core::Viewport,
};

/// Visual regions the controller drives.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    LoadingOverlay,
    ProgressBar,
    ScrollPrompt,
    InteractionHint,
    /// Black cover over freshly mounted content.
    Curtain,
    Frame,
    Content,
    ScrollIndicator,
}

impl Element {
    pub const ALL: [Self; 8] = [
        Self::LoadingOverlay,
        Self::ProgressBar,
        Self::ScrollPrompt,
        Self::InteractionHint,
        Self::Curtain,
        Self::Frame,
        Self::Content,
        Self::ScrollIndicator,
    ];
}

/// Opacity transition delegated to the rendering layer.
///
/// Completion timing stays with the controller's scheduler; the host only
/// renders the ramp.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fade {
    pub to: f64,
    pub duration_ms: u64,
    pub ease: Ease,
}

impl Fade {
    pub fn out(duration_ms: u64) -> Self {
        Self {
            to: 0.0,
            duration_ms,
            ease: Ease::InOutCubic,
        }
    }

    pub fn reveal(duration_ms: u64) -> Self {
        Self {
            to: 1.0,
            duration_ms,
            ease: Ease::InOutCubic,
        }
    }
}

/// Host page as seen by the controller.
///
/// This is the only path through which the controller mutates global page
/// state. Implementations must tolerate calls for elements that are not
/// mounted; the controller checks [`Page::is_mounted`] before effects that
/// depend on an element, but geometry refreshes may race with unmounts.
pub trait Page {
    fn viewport(&self) -> Viewport;

    fn scroll_offset(&self) -> f64;

    fn scroll_to(&mut self, offset: f64);

    /// Toggle native scroll suppression (`overflow: hidden` on the body).
    fn set_scroll_suppressed(&mut self, suppressed: bool);

    fn set_smooth_scroll(&mut self, enabled: bool);

    fn is_mounted(&self, element: Element) -> bool;

    fn fade(&mut self, element: Element, fade: Fade);

    /// Loading bar width and label, 0..=100.
    fn set_loading_progress(&mut self, percent: f64);

    fn apply_frame(&mut self, style: &FrameStyle);
}
