//! Unfurl is a scroll-gated progressive-reveal controller for single-page sites.
//!
//! A page starts behind a loading overlay with native scrolling suppressed. Once a
//! timed progress bar reaches 100, the first scroll gesture, click, key press or a
//! grace-period timeout dismisses the overlay. The content is then revealed inside a
//! small framed window that grows to full-screen as the user keeps scrolling, after
//! which native scrolling is handed back.
//!
//! # Lifecycle
//!
//! 1. **Loading**: [`Reveal::start`] scrolls to the top, takes the [`ScrollLock`] and runs
//!    the [`PhaseTimer`].
//! 2. **TransitioningOut**: the [`DismissalGate`] fires once; the overlay fades, the host
//!    is told to mount the content (`loading_complete`), a curtain fades away.
//! 3. **Expanding**: scroll distance drives the frame [`Timeline`]; the lock is held until
//!    progress reaches 1.
//! 4. **Ready**: listeners are gone and the page scrolls natively.
//!
//! The controller never reads a wall clock. Hosts feed it timestamps through
//! [`Reveal::advance`] and [`Reveal::handle`], which makes every run reproducible in
//! tests and in the trace simulator ([`simulate`]).
#![forbid(unsafe_code)]

mod animation;
mod config;
mod foundation;
mod loading;
mod lock;
mod page;
mod reveal;
mod runtime;
mod sim;

pub use animation::ease::Ease;
pub use animation::timeline::{FrameProp, FrameStyle, Stage, Timeline, Tween};
pub use config::model::{
    DismissConfig, ExpansionConfig, FrameBounds, LoadingConfig, ProgressPolicy, RevealConfig,
    TransitionConfig, ViewportConfig,
};
pub use foundation::core::{Millis, Point, Rect, Size, Viewport, validate_viewport};
pub use foundation::error::{RevealError, RevealResult};
pub use loading::dismissal::{DismissReason, DismissalGate, DismissalState};
pub use loading::hint::HintLatch;
pub use loading::phase_timer::{PhaseTimer, ProgressSteps, Tick, TimerState};
pub use lock::scroll_lock::{LockReason, ScrollLock, ScrollLockToken};
pub use page::memory::MemoryPage;
pub use page::surface::{Element, Fade, Page};
#[cfg(feature = "web")]
pub use page::web::{WebPage, default_element_id};
pub use reveal::controller::Reveal;
pub use reveal::event::{InputEvent, Phase, RevealEvent};
pub use reveal::expansion::{ExpansionController, ExpansionState, ExpansionUpdate};
pub use reveal::transition::{Signals, TransitionSequencer, TransitionStage};
pub use reveal::viewport::{MIN_SCROLL_BUDGET_PX, TriggerGeometry, ViewportSync};
pub use runtime::Runtime;
pub use runtime::listeners::{EventKind, ListenerId, Listeners, Owner};
pub use runtime::scheduler::{Scheduler, Task, TimerId};
pub use sim::trace::{
    DEFAULT_VIEWPORT, SimReport, TimedEvent, Trace, TraceInput, TraceStep, parse_trace, simulate,
};
