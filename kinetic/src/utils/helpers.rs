/// Trait for mixing two values of the same type according to a progress ratio.
pub trait Mix<T> {
    /// Returns the value at `progress` between `from` (progress 0) and `to` (progress 1).
    ///
    /// # Parameters
    /// * `self`:  the progress (not clamped: values outside [0, 1] extrapolate)
    /// * `from`:  the value at progress 0
    /// * `to`:  the value at progress 1
    fn mix(self, from: T, to: T) -> T;
}

impl Mix<f64> for f64 {
    /// Both ends are exact: `0.0.mix(a, b) == a` and `1.0.mix(a, b) == b`.
    fn mix(self, from: f64, to: f64) -> f64 {
        from * (1.0 - self) + to * self
    }
}

/// Returns the relative position of `value` between `from` and `to`.
///
/// A zero-width range returns 1: whatever the value, the range is considered fully run.
pub fn progress(from: f64, to: f64, value: f64) -> f64 {
    match to - from {
        range if range == 0.0 => 1.0,
        range => (value - from) / range,
    }
}

/// Wraps an index into the `[min, max)` range.
pub fn wrap(min: usize, max: usize, value: usize) -> usize {
    let range = max - min;
    (value - min) % range + min
}

/// Fills `offsets` with `remaining` evenly spaced values going from its last item up to 1.
pub fn fill_offsets(offsets: &mut Vec<f64>, remaining: usize) {
    let min = offsets.last().copied().unwrap_or_default();
    for index in 1..=remaining {
        let ratio = progress(0.0, remaining as f64, index as f64);
        offsets.push(ratio.mix(min, 1.0));
    }
}

/// Builds `count` evenly spaced offsets between 0 and 1.
pub fn default_offsets(count: usize) -> Vec<f64> {
    let mut offsets = vec![0.0];
    fill_offsets(&mut offsets, count.saturating_sub(1));
    offsets
}
