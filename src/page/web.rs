//! Browser [`Page`] backed by `web-sys`.
//!
//! Elements are located by id on every call so that the controller keeps
//! working across re-renders of the surrounding shell; a missing element is
//! skipped, never an error.

use wasm_bindgen::JsCast as _;
use web_sys::{Document, HtmlElement, Window};

use crate::{
    animation::timeline::FrameStyle,
    foundation::core::Viewport,
    page::surface::{Element, Fade, Page},
};

/// Default DOM ids for each [`Element`].
pub fn default_element_id(element: Element) -> &'static str {
    match element {
        Element::LoadingOverlay => "unfurl-loading-overlay",
        Element::ProgressBar => "unfurl-progress-bar",
        Element::ScrollPrompt => "unfurl-scroll-prompt",
        Element::InteractionHint => "unfurl-interaction-hint",
        Element::Curtain => "unfurl-curtain",
        Element::Frame => "unfurl-frame",
        Element::Content => "unfurl-content",
        Element::ScrollIndicator => "unfurl-scroll-indicator",
    }
}

/// Live DOM page.
pub struct WebPage {
    window: Window,
    document: Document,
    element_id: fn(Element) -> &'static str,
}

impl core::fmt::Debug for WebPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebPage")
            .field("window", &"Window")
            .field("document", &"Document")
            .finish()
    }
}

impl WebPage {
    /// Bind to the global `window`; `None` outside a browser context.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            element_id: default_element_id,
        })
    }

    pub fn with_element_ids(mut self, element_id: fn(Element) -> &'static str) -> Self {
        self.element_id = element_id;
        self
    }

    fn element(&self, element: Element) -> Option<HtmlElement> {
        self.document
            .get_element_by_id((self.element_id)(element))?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn set_style(el: &HtmlElement, name: &str, value: &str) {
        if el.style().set_property(name, value).is_err() {
            tracing::warn!(name, value, "style write rejected");
        }
    }
}

impl Page for WebPage {
    fn viewport(&self) -> Viewport {
        let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport::new(
            read(self.window.inner_width()),
            read(self.window.inner_height()),
        )
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, offset: f64) {
        self.window.scroll_to_with_x_and_y(0.0, offset);
    }

    fn set_scroll_suppressed(&mut self, suppressed: bool) {
        let Some(body) = self.document.body() else {
            tracing::warn!("document has no body; scroll suppression skipped");
            return;
        };
        if suppressed {
            Self::set_style(&body, "overflow", "hidden");
        } else if body.style().remove_property("overflow").is_err() {
            tracing::warn!("failed to clear body overflow");
        }
    }

    fn set_smooth_scroll(&mut self, enabled: bool) {
        let Some(root) = self
            .document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        Self::set_style(
            &root,
            "scroll-behavior",
            if enabled { "smooth" } else { "auto" },
        );
    }

    fn is_mounted(&self, element: Element) -> bool {
        self.element(element).is_some()
    }

    fn fade(&mut self, element: Element, fade: Fade) {
        let Some(el) = self.element(element) else {
            return;
        };
        let transition = format!("opacity {}ms {}", fade.duration_ms, fade.ease.css());
        Self::set_style(&el, "transition", &transition);
        Self::set_style(&el, "opacity", &fade.to.to_string());
    }

    fn set_loading_progress(&mut self, percent: f64) {
        if let Some(el) = self.element(Element::ProgressBar) {
            Self::set_style(&el, "width", &format!("{percent}%"));
        }
    }

    fn apply_frame(&mut self, style: &FrameStyle) {
        let Some(frame) = self.element(Element::Frame) else {
            return;
        };
        Self::set_style(&frame, "width", &format!("{}vw", style.width_vw));
        Self::set_style(&frame, "height", &format!("{}vh", style.height_vh));
        Self::set_style(&frame, "border-radius", &format!("{}px", style.radius_px));
        Self::set_style(
            &frame,
            "box-shadow",
            &format!(
                "0 0 {}px rgba(255,255,255,0.08), inset 0 0 30px rgba(255,255,255,{})",
                style.shadow_px,
                style.glow_opacity * 0.1
            ),
        );
        Self::set_style(
            &frame,
            "outline",
            &format!("1px solid rgba(255,255,255,{})", style.outline_opacity),
        );
        if let Some(indicator) = self.element(Element::ScrollIndicator) {
            Self::set_style(&indicator, "opacity", &style.indicator_opacity.to_string());
        }
    }
}
