//! Sweep timing.
//!
//! One animation cycle is a sweep of `period_ms` followed by an idle gap of
//! `pause_ms`. During the sweep the phase runs linearly from `0` to `1`;
//! during the gap there is no phase and no highlight is drawn.

/// Sweep progress for `elapsed_ms`, or `None` while paused.
///
/// `period_ms` must be positive; the configuration guarantees at least 200.
///
/// # Examples
///
/// ```
/// use cs_render::sweep::sweep_phase;
///
/// assert_eq!(sweep_phase(400.0, 1600.0, 500.0), Some(0.25));
/// assert_eq!(sweep_phase(1700.0, 1600.0, 500.0), None);
/// assert_eq!(sweep_phase(2100.0, 1600.0, 500.0), Some(0.0));
/// ```
#[must_use]
pub fn sweep_phase(elapsed_ms: f64, period_ms: f64, pause_ms: f64) -> Option<f64> {
    let total_cycle = period_ms + pause_ms;
    let cycle_pos = elapsed_ms.rem_euclid(total_cycle);
    (cycle_pos < period_ms).then(|| cycle_pos / period_ms)
}

/// Triangular 0 → 1 → 0 ramp over one sweep.
///
/// Scales both the band width and the highlight opacity so the band grows in
/// from nothing and fades out again instead of popping at the text edges.
///
/// # Examples
///
/// ```
/// use cs_render::sweep::envelope;
///
/// assert_eq!(envelope(0.0), 0.0);
/// assert_eq!(envelope(0.25), 0.5);
/// assert_eq!(envelope(0.5), 1.0);
/// ```
#[inline]
#[must_use]
pub fn envelope(phase: f64) -> f64 {
    if phase < 0.5 {
        phase * 2.0
    } else {
        (1.0 - phase) * 2.0
    }
}
