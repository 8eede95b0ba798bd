use crate::core::types::AxisLimits;

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Upper bound on the bins the automatic locator will produce.
pub const MAX_TICK_BINS: usize = 100;

/// Picks at most `max_bins + 1` evenly spaced "nice" tick values inside `limits`.
///
/// Steps are drawn from `{1, 2, 2.5, 5} * 10^k`, choosing the smallest step
/// that keeps the number of intervals within `max_bins`, itself clamped to
/// `MAX_TICK_BINS`.
#[must_use]
pub fn max_n_ticks(limits: AxisLimits, max_bins: usize) -> Vec<f64> {
    if max_bins == 0 {
        return Vec::new();
    }
    let max_bins = max_bins.min(MAX_TICK_BINS);
    let (lower, upper) = if limits.lower <= limits.upper {
        (limits.lower, limits.upper)
    } else {
        (limits.upper, limits.lower)
    };
    let span = upper - lower;
    if !span.is_finite() {
        return Vec::new();
    }
    if span <= 0.0 {
        return vec![lower];
    }

    let step = nice_step(span / max_bins as f64);
    let first = (lower / step).ceil();
    let last = (upper / step).floor();
    if first > last {
        return Vec::new();
    }

    let count = (last - first) as usize + 1;
    (0..count)
        .map(|offset| {
            let value = (first + offset as f64) * step;
            // Collapse float noise and negative zero.
            let rounded = (value / step).round() * step;
            if rounded == 0.0 { 0.0 } else { rounded }
        })
        .collect()
}

fn nice_step(raw_step: f64) -> f64 {
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let factor = NICE_STEPS
        .iter()
        .copied()
        .find(|candidate| *candidate >= normalized - 1e-9)
        .unwrap_or(10.0);
    factor * magnitude
}

/// Formats a tick value without trailing zeros, the way axis labels print.
#[must_use]
pub fn format_tick_value(value: f64) -> String {
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
