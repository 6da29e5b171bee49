use crate::{
    animation::ease::Ease,
    config::model::FrameBounds,
    foundation::{
        core::{Rect, Viewport},
        math::{clamp_unit, lerp, span_local},
    },
};

/// Named stages of the frame expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    GlowIn,
    GrowIntermediate,
    GrowFull,
    GlowOut,
}

/// Animatable properties of the frame and its companions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameProp {
    WidthVw,
    HeightVh,
    RadiusPx,
    ShadowPx,
    OutlineOpacity,
    GlowOpacity,
    IndicatorOpacity,
}

/// Resolved visual state of the frame at one point of the timeline.
///
/// The glow is a layered opacity ramp bound to the same progress value, so a
/// renderer draws it as an inset shadow instead of injecting elements.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameStyle {
    pub width_vw: f64,
    pub height_vh: f64,
    pub radius_px: f64,
    pub shadow_px: f64,
    pub outline_opacity: f64,
    pub glow_opacity: f64,
    pub indicator_opacity: f64,
}

impl FrameStyle {
    /// The starting state: small, centered, rounded, faint outline.
    pub fn minimum(bounds: &FrameBounds) -> Self {
        Self {
            width_vw: bounds.min_width_vw,
            height_vh: bounds.min_height_vh,
            radius_px: bounds.corner_radius_px,
            shadow_px: bounds.shadow_px,
            outline_opacity: bounds.outline_opacity,
            glow_opacity: 0.0,
            indicator_opacity: 1.0,
        }
    }

    pub fn full_screen() -> Self {
        Self {
            width_vw: 100.0,
            height_vh: 100.0,
            radius_px: 0.0,
            shadow_px: 0.0,
            outline_opacity: 0.0,
            glow_opacity: 0.0,
            indicator_opacity: 0.0,
        }
    }

    pub fn get(&self, prop: FrameProp) -> f64 {
        match prop {
            FrameProp::WidthVw => self.width_vw,
            FrameProp::HeightVh => self.height_vh,
            FrameProp::RadiusPx => self.radius_px,
            FrameProp::ShadowPx => self.shadow_px,
            FrameProp::OutlineOpacity => self.outline_opacity,
            FrameProp::GlowOpacity => self.glow_opacity,
            FrameProp::IndicatorOpacity => self.indicator_opacity,
        }
    }

    fn set(&mut self, prop: FrameProp, v: f64) {
        match prop {
            FrameProp::WidthVw => self.width_vw = v,
            FrameProp::HeightVh => self.height_vh = v,
            FrameProp::RadiusPx => self.radius_px = v,
            FrameProp::ShadowPx => self.shadow_px = v,
            FrameProp::OutlineOpacity => self.outline_opacity = v,
            FrameProp::GlowOpacity => self.glow_opacity = v,
            FrameProp::IndicatorOpacity => self.indicator_opacity = v,
        }
    }

    /// Frame rectangle in CSS pixels, centered in `viewport`.
    pub fn rect_in(&self, viewport: Viewport) -> Rect {
        let w = viewport.width * self.width_vw / 100.0;
        let h = viewport.height * self.height_vh / 100.0;
        let x0 = (viewport.width - w) / 2.0;
        let y0 = (viewport.height - h) / 2.0;
        Rect::new(x0, y0, x0 + w, y0 + h)
    }
}

/// One property ramp on the timeline, positioned in timeline units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Tween {
    pub stage: Option<Stage>,
    pub prop: FrameProp,
    pub start: f64,
    pub end: f64,
    pub from: f64,
    pub to: f64,
    pub ease: Ease,
}

/// Staged property timeline sampled by normalized progress.
///
/// Tweens are kept sorted by start position; a later tween on the same
/// property overrides earlier ones once its start is reached.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    base: FrameStyle,
    tweens: Vec<Tween>,
    duration: f64,
}

impl Timeline {
    pub fn new(base: FrameStyle) -> Self {
        Self {
            base,
            tweens: Vec::new(),
            duration: 0.0,
        }
    }

    /// Append a ramp of `prop` towards `to`, starting from whatever value the
    /// timeline already holds at `start`.
    pub fn to(
        mut self,
        stage: Option<Stage>,
        prop: FrameProp,
        start: f64,
        span: f64,
        to: f64,
        ease: Ease,
    ) -> Self {
        let start = start.max(0.0);
        let end = start + span.max(0.0);
        let from = self.value_at(prop, start);
        let idx = self.tweens.partition_point(|t| t.start <= start);
        self.tweens.insert(
            idx,
            Tween {
                stage,
                prop,
                start,
                end,
                from,
                to,
                ease,
            },
        );
        self.duration = self.duration.max(end);
        self
    }

    /// The canonical four-stage expansion: glow fade-in, growth to the
    /// midpoint size, growth to full-screen with corner and shadow flattening,
    /// glow fade-out. The scroll indicator fades over the first tenth.
    pub fn expansion(bounds: &FrameBounds) -> Self {
        Self::new(FrameStyle::minimum(bounds))
            .to(
                None,
                FrameProp::IndicatorOpacity,
                0.0,
                0.25,
                0.0,
                Ease::Linear,
            )
            .to(
                Some(Stage::GlowIn),
                FrameProp::GlowOpacity,
                0.0,
                1.0,
                bounds.glow_peak,
                Ease::OutQuad,
            )
            .to(
                Some(Stage::GrowIntermediate),
                FrameProp::WidthVw,
                0.0,
                1.0,
                bounds.mid_width_vw,
                Ease::OutQuad,
            )
            .to(
                Some(Stage::GrowIntermediate),
                FrameProp::HeightVh,
                0.0,
                1.0,
                bounds.mid_height_vh,
                Ease::OutQuad,
            )
            .to(
                Some(Stage::GrowFull),
                FrameProp::WidthVw,
                1.0,
                1.5,
                100.0,
                Ease::InOutQuart,
            )
            .to(
                Some(Stage::GrowFull),
                FrameProp::HeightVh,
                1.0,
                1.5,
                100.0,
                Ease::InOutQuart,
            )
            .to(
                Some(Stage::GrowFull),
                FrameProp::RadiusPx,
                1.0,
                1.5,
                0.0,
                Ease::InOutQuart,
            )
            .to(
                Some(Stage::GrowFull),
                FrameProp::ShadowPx,
                1.0,
                1.5,
                0.0,
                Ease::InOutQuart,
            )
            .to(
                Some(Stage::GrowFull),
                FrameProp::OutlineOpacity,
                1.0,
                1.5,
                0.0,
                Ease::Linear,
            )
            .to(
                Some(Stage::GlowOut),
                FrameProp::GlowOpacity,
                1.0,
                1.5,
                0.0,
                Ease::OutQuad,
            )
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    fn value_at(&self, prop: FrameProp, t: f64) -> f64 {
        let mut v = self.base.get(prop);
        for tween in self.tweens.iter().filter(|tw| tw.prop == prop) {
            if t < tween.start {
                break;
            }
            let local = span_local(t, tween.start, tween.end);
            v = lerp(tween.from, tween.to, tween.ease.apply(local));
        }
        v
    }

    /// Resolve every property at normalized `progress` (clamped to `[0, 1]`).
    pub fn sample(&self, progress: f64) -> FrameStyle {
        let t = clamp_unit(progress) * self.duration;
        let mut style = self.base;
        for tween in &self.tweens {
            if t < tween.start {
                continue;
            }
            let local = span_local(t, tween.start, tween.end);
            style.set(tween.prop, lerp(tween.from, tween.to, tween.ease.apply(local)));
        }
        style
    }

    /// Stages active at `progress`, in timeline order.
    pub fn stages_at(&self, progress: f64) -> Vec<Stage> {
        let t = clamp_unit(progress) * self.duration;
        let mut out = Vec::new();
        for tween in &self.tweens {
            let Some(stage) = tween.stage else { continue };
            let active = t >= tween.start && (t < tween.end || tween.end >= self.duration);
            if active && !out.contains(&stage) {
                out.push(stage);
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
