use crate::foundation::error::{RevealError, RevealResult};

/// Full controller configuration.
///
/// Every section has defaults matching the reference site, so an empty JSON
/// object (`{}`) is a valid configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Loading progress timer.
    pub loading: LoadingConfig,
    /// Dismissal triggers and timeout fallback.
    pub dismiss: DismissConfig,
    /// Overlay fade and content handoff.
    pub transition: TransitionConfig,
    /// Scroll-driven frame expansion.
    pub expansion: ExpansionConfig,
    /// Trigger geometry recomputation.
    pub viewport: ViewportConfig,
}

/// Loading progress timer settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Wall-clock time for progress to go from 0 to 100.
    pub duration_ms: u64,
    /// Interval between progress ticks.
    pub tick_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 4000,
            tick_ms: 50,
        }
    }
}

/// Dismissal gate settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DismissConfig {
    /// Auto-dismiss delay after loading reaches 100.
    pub grace_ms: u64,
    /// Native scroll offset that counts as a dismiss gesture.
    pub scroll_threshold_px: f64,
    /// Accept gestures and clicks before loading reaches 100.
    pub allow_early: bool,
    /// Fade applied to the "click & drag" hint on first interaction.
    pub hint_fade_ms: u64,
    /// Fade-in of the scroll prompt once loading completes.
    pub prompt_reveal_ms: u64,
}

impl Default for DismissConfig {
    fn default() -> Self {
        Self {
            grace_ms: 8000,
            scroll_threshold_px: 10.0,
            allow_early: false,
            hint_fade_ms: 500,
            prompt_reveal_ms: 800,
        }
    }
}

/// Transition sequencing settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub prompt_fade_ms: u64,
    pub overlay_fade_ms: u64,
    /// Pause between the overlay fade and `loading_complete`.
    pub handoff_delay_ms: u64,
    /// Fade of the black curtain that covers the freshly mounted content.
    pub curtain_fade_ms: u64,
    /// Upper bound on waiting for the content-mounted signal.
    pub mount_timeout_ms: u64,
    /// Geometry refresh delay after handoff.
    pub handoff_refresh_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            prompt_fade_ms: 500,
            overlay_fade_ms: 800,
            handoff_delay_ms: 300,
            curtain_fade_ms: 1000,
            mount_timeout_ms: 3000,
            handoff_refresh_ms: 300,
        }
    }
}

/// How backward scroll deltas affect expansion progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPolicy {
    /// Only forward deltas count; progress never regresses.
    #[default]
    Accumulate,
    /// Backward deltas shrink the frame again until completion.
    Bidirectional,
}

/// Frame dimensions at the start and midpoint of the expansion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameBounds {
    pub min_width_vw: f64,
    pub min_height_vh: f64,
    pub mid_width_vw: f64,
    pub mid_height_vh: f64,
    pub corner_radius_px: f64,
    pub shadow_px: f64,
    pub outline_opacity: f64,
    pub glow_peak: f64,
}

impl Default for FrameBounds {
    fn default() -> Self {
        Self {
            min_width_vw: 20.0,
            min_height_vh: 20.0,
            mid_width_vw: 60.0,
            mid_height_vh: 60.0,
            corner_radius_px: 12.0,
            shadow_px: 30.0,
            outline_opacity: 0.1,
            glow_peak: 0.8,
        }
    }
}

/// Expansion controller settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// When false the controller takes the direct path to `Ready`.
    pub enabled: bool,
    /// Scroll budget as a multiple of viewport height.
    pub budget_fraction: f64,
    pub policy: ProgressPolicy,
    /// Lag of the rendered frame behind committed progress; 0 renders immediately.
    pub scrub_ms: u64,
    /// Interval between scrub frames.
    pub frame_interval_ms: u64,
    /// Fade of the content layer after completion.
    pub reveal_fade_ms: u64,
    pub frame: FrameBounds,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            budget_fraction: 1.2,
            policy: ProgressPolicy::Accumulate,
            scrub_ms: 0,
            frame_interval_ms: 16,
            reveal_fade_ms: 600,
            frame: FrameBounds::default(),
        }
    }
}

/// Viewport synchronization settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Quiet period required after the last resize event.
    pub resize_debounce_ms: u64,
    /// Delay before recomputing geometry after content becomes ready.
    pub settle_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 150,
            settle_ms: 500,
        }
    }
}

impl RevealConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json_str(json: &str) -> RevealResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RevealError::serde(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RevealResult<()> {
        if self.loading.tick_ms == 0 {
            return Err(RevealError::config("loading.tick_ms must be > 0"));
        }
        if self.loading.duration_ms == 0 {
            return Err(RevealError::config("loading.duration_ms must be > 0"));
        }
        let threshold = self.dismiss.scroll_threshold_px;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(RevealError::config(
                "dismiss.scroll_threshold_px must be finite and >= 0",
            ));
        }
        let fraction = self.expansion.budget_fraction;
        if !fraction.is_finite() || fraction <= 0.0 {
            return Err(RevealError::config(
                "expansion.budget_fraction must be finite and > 0",
            ));
        }
        if self.expansion.scrub_ms > 0 && self.expansion.frame_interval_ms == 0 {
            return Err(RevealError::config(
                "expansion.frame_interval_ms must be > 0 when scrubbing",
            ));
        }
        self.expansion.frame.validate()
    }
}

impl FrameBounds {
    pub fn validate(&self) -> RevealResult<()> {
        let dims = [
            ("min_width_vw", self.min_width_vw),
            ("min_height_vh", self.min_height_vh),
            ("mid_width_vw", self.mid_width_vw),
            ("mid_height_vh", self.mid_height_vh),
        ];
        for (name, v) in dims {
            if !v.is_finite() || !(0.0..=100.0).contains(&v) {
                return Err(RevealError::config(format!(
                    "expansion.frame.{name} must be within 0..=100"
                )));
            }
        }
        if self.min_width_vw > self.mid_width_vw || self.min_height_vh > self.mid_height_vh {
            return Err(RevealError::config(
                "expansion.frame minimum must not exceed the midpoint size",
            ));
        }
        for (name, v) in [
            ("outline_opacity", self.outline_opacity),
            ("glow_peak", self.glow_peak),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(RevealError::config(format!(
                    "expansion.frame.{name} must be within 0..=1"
                )));
            }
        }
        if !self.corner_radius_px.is_finite() || self.corner_radius_px < 0.0 {
            return Err(RevealError::config(
                "expansion.frame.corner_radius_px must be >= 0",
            ));
        }
        if !self.shadow_px.is_finite() || self.shadow_px < 0.0 {
            return Err(RevealError::config("expansion.frame.shadow_px must be >= 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
