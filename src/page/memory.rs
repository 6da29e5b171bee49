use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::timeline::FrameStyle,
    foundation::core::{Rect, Viewport},
    page::surface::{Element, Fade, Page},
};

/// Headless [`Page`] that records every mutation.
///
/// Used by the trace simulator and tests; fades complete instantly in the
/// recorded opacity map.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MemoryPage {
    viewport: Viewport,
    scroll_offset: f64,
    scroll_suppressed: bool,
    smooth_scroll: bool,
    mounted: BTreeSet<Element>,
    opacity: BTreeMap<Element, f64>,
    fades: Vec<(Element, Fade)>,
    frame: Option<FrameStyle>,
    frame_rect: Option<Rect>,
    loading_percent: f64,
    suppress_writes: u32,
    scroll_writes: u32,
}

impl MemoryPage {
    /// A page with every element mounted.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_offset: 0.0,
            scroll_suppressed: false,
            smooth_scroll: false,
            mounted: Element::ALL.into_iter().collect(),
            opacity: BTreeMap::new(),
            fades: Vec::new(),
            frame: None,
            frame_rect: None,
            loading_percent: 0.0,
            suppress_writes: 0,
            scroll_writes: 0,
        }
    }

    pub fn without(mut self, element: Element) -> Self {
        self.mounted.remove(&element);
        self
    }

    pub fn mount(&mut self, element: Element) {
        self.mounted.insert(element);
    }

    pub fn unmount(&mut self, element: Element) {
        self.mounted.remove(&element);
    }

    /// Simulate a window resize; the controller still has to be told via a
    /// resize event.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Simulate native scrolling by the user (not counted as a controller write).
    pub fn user_scroll(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    pub fn is_scroll_suppressed(&self) -> bool {
        self.scroll_suppressed
    }

    pub fn is_smooth_scroll(&self) -> bool {
        self.smooth_scroll
    }

    pub fn opacity(&self, element: Element) -> Option<f64> {
        self.opacity.get(&element).copied()
    }

    pub fn fades(&self) -> &[(Element, Fade)] {
        &self.fades
    }

    pub fn fades_of(&self, element: Element) -> usize {
        self.fades.iter().filter(|(e, _)| *e == element).count()
    }

    pub fn frame(&self) -> Option<FrameStyle> {
        self.frame
    }

    pub fn frame_rect(&self) -> Option<Rect> {
        self.frame_rect
    }

    pub fn loading_percent(&self) -> f64 {
        self.loading_percent
    }

    /// Number of times the suppression style was written.
    pub fn suppress_writes(&self) -> u32 {
        self.suppress_writes
    }

    /// Number of controller-issued scroll position writes.
    pub fn scroll_writes(&self) -> u32 {
        self.scroll_writes
    }
}

impl Page for MemoryPage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset;
        self.scroll_writes += 1;
    }

    fn set_scroll_suppressed(&mut self, suppressed: bool) {
        self.scroll_suppressed = suppressed;
        self.suppress_writes += 1;
    }

    fn set_smooth_scroll(&mut self, enabled: bool) {
        self.smooth_scroll = enabled;
    }

    fn is_mounted(&self, element: Element) -> bool {
        self.mounted.contains(&element)
    }

    fn fade(&mut self, element: Element, fade: Fade) {
        if !self.mounted.contains(&element) {
            return;
        }
        self.fades.push((element, fade));
        self.opacity.insert(element, fade.to);
    }

    fn set_loading_progress(&mut self, percent: f64) {
        self.loading_percent = percent;
    }

    fn apply_frame(&mut self, style: &FrameStyle) {
        if !self.mounted.contains(&Element::Frame) {
            return;
        }
        self.frame = Some(*style);
        self.frame_rect = Some(style.rect_in(self.viewport));
        if self.mounted.contains(&Element::ScrollIndicator) {
            self.opacity
                .insert(Element::ScrollIndicator, style.indicator_opacity);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/memory.rs"]
mod tests;
