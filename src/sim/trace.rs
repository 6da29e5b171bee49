use std::{cell::Cell, rc::Rc};

use crate::{
    config::model::RevealConfig,
    foundation::{
        core::{Millis, Viewport, validate_viewport},
        error::{RevealError, RevealResult},
    },
    loading::dismissal::DismissalState,
    page::{memory::MemoryPage, surface::Element},
    reveal::{
        controller::Reveal,
        event::{InputEvent, Phase, RevealEvent},
        expansion::ExpansionState,
    },
};

/// Viewport used when a trace does not specify one.
pub const DEFAULT_VIEWPORT: Viewport = Viewport::new(1280.0, 800.0);

/// Timestamped inputs replayed against an in-memory page.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Trace {
    pub viewport: Option<Viewport>,
    /// Elements absent from the page.
    pub missing: Vec<Element>,
    /// Signal content-mounted as soon as `loading_complete` fires.
    pub mount_on_complete: bool,
    /// Keep running scheduled tasks until this time after the last step.
    pub until_ms: Option<u64>,
    pub steps: Vec<TraceStep>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TraceStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub input: TraceInput,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceInput {
    /// The user scrolled natively to `offset`.
    Scroll { offset: f64 },
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    KeyDown,
    PointerDown,
    Click,
    Resize { width: f64, height: f64 },
    Visibility { visible: bool },
    ContentMounted,
    /// Only run due tasks.
    Advance,
    Teardown,
    Restart,
}

/// Event stamped with the clock time at which it was observed.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: RevealEvent,
}

/// Final controller and page state after a replay.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SimReport {
    pub end_ms: u64,
    pub phase: Phase,
    pub dismissal: DismissalState,
    pub loading_progress: f64,
    pub expansion_progress: f64,
    pub expansion_state: ExpansionState,
    pub lock_held: bool,
    pub lock_acquisitions: u64,
    pub lock_releases: u64,
    pub listeners: usize,
    pub loading_complete_calls: u32,
    pub callback_calls: u32,
    pub events: Vec<TimedEvent>,
    pub page: MemoryPage,
}

impl SimReport {
    pub fn count(&self, pred: impl Fn(&RevealEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.event)).count()
    }
}

impl Trace {
    /// Steps must be in non-decreasing time order with finite inputs.
    pub fn validate(&self) -> RevealResult<()> {
        if let Some(viewport) = self.viewport {
            validate_viewport(viewport)?;
        }
        let mut prev = 0;
        for (i, step) in self.steps.iter().enumerate() {
            if step.at_ms < prev {
                return Err(RevealError::trace(format!(
                    "step {i} at {} ms precedes the previous step at {prev} ms",
                    step.at_ms
                )));
            }
            prev = step.at_ms;
            let finite = match step.input {
                TraceInput::Scroll { offset: v }
                | TraceInput::Wheel { delta_y: v }
                | TraceInput::TouchStart { y: v }
                | TraceInput::TouchMove { y: v } => v.is_finite(),
                TraceInput::Resize { width, height } => width.is_finite() && height.is_finite(),
                _ => true,
            };
            if !finite {
                return Err(RevealError::trace(format!("step {i} has a non-finite value")));
            }
        }
        Ok(())
    }
}

pub fn parse_trace(json: &str) -> RevealResult<Trace> {
    let trace: Trace = serde_json::from_str(json).map_err(|e| RevealError::serde(e.to_string()))?;
    trace.validate()?;
    Ok(trace)
}

struct Replay {
    reveal: Reveal<MemoryPage>,
    mount_on_complete: bool,
    events: Vec<TimedEvent>,
}

impl Replay {
    fn collect(&mut self) {
        let at_ms = self.reveal.now().0;
        let mut saw_complete = false;
        for event in self.reveal.drain_events() {
            saw_complete |= event == RevealEvent::LoadingComplete;
            self.events.push(TimedEvent { at_ms, event });
        }
        if saw_complete && self.mount_on_complete {
            let now = self.reveal.now();
            self.reveal.content_mounted(now);
            self.collect();
        }
    }

    /// Run due tasks one instant at a time so events carry exact timestamps.
    fn run_until(&mut self, until: Millis) {
        while let Some(due) = self.reveal.next_due() {
            if due > until {
                break;
            }
            self.reveal.advance(due);
            self.collect();
        }
        self.reveal.advance(until);
        self.collect();
    }

    fn step(&mut self, step: &TraceStep) {
        let now = Millis(step.at_ms);
        self.run_until(now);
        let input = match step.input {
            TraceInput::Scroll { offset } => {
                self.reveal.page_mut().user_scroll(offset);
                Some(InputEvent::Scroll { offset })
            }
            TraceInput::Wheel { delta_y } => Some(InputEvent::Wheel { delta_y }),
            TraceInput::TouchStart { y } => Some(InputEvent::TouchStart { y }),
            TraceInput::TouchMove { y } => Some(InputEvent::TouchMove { y }),
            TraceInput::KeyDown => Some(InputEvent::KeyDown),
            TraceInput::PointerDown => Some(InputEvent::PointerDown),
            TraceInput::Click => Some(InputEvent::Click),
            TraceInput::Resize { width, height } => {
                self.reveal.page_mut().resize(Viewport::new(width, height));
                Some(InputEvent::Resize)
            }
            TraceInput::Visibility { visible } => Some(InputEvent::Visibility { visible }),
            TraceInput::ContentMounted => {
                self.reveal.content_mounted(now);
                None
            }
            TraceInput::Advance => None,
            TraceInput::Teardown => {
                self.reveal.teardown();
                None
            }
            TraceInput::Restart => {
                self.reveal.restart(now);
                None
            }
        };
        if let Some(input) = input {
            let delivered = self.reveal.handle(now, input);
            tracing::trace!(at = now.0, ?input, delivered, "trace input");
        }
        self.collect();
    }
}

/// Replay `trace` against a fresh controller on a [`MemoryPage`].
#[tracing::instrument(skip_all, fields(steps = trace.steps.len()))]
pub fn simulate(config: &RevealConfig, trace: &Trace) -> RevealResult<SimReport> {
    trace.validate()?;
    let mut page = MemoryPage::new(trace.viewport.unwrap_or(DEFAULT_VIEWPORT));
    for element in &trace.missing {
        page.unmount(*element);
    }

    let mut reveal = Reveal::new(config.clone(), page)?;
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);
    reveal.on_loading_complete(move || counter.set(counter.get() + 1));
    reveal.start(Millis::ZERO);

    let mut replay = Replay {
        reveal,
        mount_on_complete: trace.mount_on_complete,
        events: Vec::new(),
    };
    replay.collect();
    for step in &trace.steps {
        replay.step(step);
    }
    if let Some(until) = trace.until_ms {
        replay.run_until(Millis(until));
    }

    let reveal = &replay.reveal;
    let report = SimReport {
        end_ms: reveal.now().0,
        phase: reveal.phase(),
        dismissal: reveal.dismissal(),
        loading_progress: reveal.loading_progress(),
        expansion_progress: reveal.expansion_progress(),
        expansion_state: reveal.expansion_state(),
        lock_held: reveal.lock().is_held(),
        lock_acquisitions: reveal.lock().acquisitions(),
        lock_releases: reveal.lock().releases(),
        listeners: reveal.listeners().len(),
        loading_complete_calls: reveal.loading_complete_calls(),
        callback_calls: calls.get(),
        events: std::mem::take(&mut replay.events),
        page: reveal.page().clone(),
    };
    tracing::debug!(phase = ?report.phase, events = report.events.len(), "simulation finished");
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/sim/trace.rs"]
mod tests;
