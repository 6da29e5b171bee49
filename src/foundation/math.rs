/// Tolerance used when comparing progress values.
pub(crate) const PROGRESS_EPSILON: f64 = 1e-9;

/// Clamp to `[0, 1]`, mapping NaN to `0`.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Normalized position of `t` inside `[start, end]`; zero-length spans snap to 1 once reached.
pub(crate) fn span_local(t: f64, start: f64, end: f64) -> f64 {
    let len = end - start;
    if len <= 0.0 {
        return if t >= start { 1.0 } else { 0.0 };
    }
    clamp_unit((t - start) / len)
}
