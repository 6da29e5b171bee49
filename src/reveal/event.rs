use crate::{
    loading::dismissal::DismissReason,
    page::surface::Element,
    runtime::listeners::EventKind,
};

/// Top-level mode of the reveal controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    TransitioningOut,
    Expanding,
    Ready,
}

/// Raw input delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Native scroll; `offset` is the page's new vertical offset.
    Scroll { offset: f64 },
    /// Wheel gesture; positive `delta_y` scrolls down.
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    KeyDown,
    PointerDown,
    /// Click on the scroll prompt.
    Click,
    /// Window resized; the page reports the new viewport.
    Resize,
    Visibility { visible: bool },
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Wheel { .. } => EventKind::Wheel,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::TouchMove { .. } => EventKind::TouchMove,
            Self::KeyDown => EventKind::KeyDown,
            Self::PointerDown => EventKind::PointerDown,
            Self::Click => EventKind::Click,
            Self::Resize => EventKind::Resize,
            Self::Visibility { .. } => EventKind::Visibility,
        }
    }
}

/// Outbound notifications for the display layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealEvent {
    PhaseChanged { from: Phase, to: Phase },
    LoadingProgress { percent: f64 },
    /// Loading reached 100; the scroll prompt is shown.
    LoadingFinished,
    HintDismissed,
    Dismissed { reason: DismissReason },
    /// The page shell may swap to the content tree.
    LoadingComplete,
    ContentReady,
    ExpansionProgress { progress: f64 },
    ExpansionSuspended,
    ExpansionResumed,
    ExpansionComplete,
    GeometryRefreshed { scroll_budget: f64 },
    EffectSkipped { element: Element },
}
