use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::animations::{Easing, TimingConfig};
use crate::errors::{EmptyKeyframes, Error};
use crate::utils::helpers::{default_offsets, fill_offsets, progress, wrap};
use crate::utils::{Mix, Value};

/// Represents the ordered target values of a single property.
///
/// Each value may be given a position (offset) on the animation timeline in the range [0, 1].
/// Missing offsets are distributed evenly between the last given one and 1.
///
/// # Example
/// ```
/// use kinetic::animations::KeyframeSet;
/// use kinetic::utils::Value;
///
/// // Move from the current value to 100, fast then slow.
/// let keyframes = KeyframeSet::from([Value::Null, Value::from(80), Value::from(100)])
///     .set_offsets(vec![0.0, 0.2]);
/// assert_eq!(keyframes.get_values().len(), 3);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeSet {
    /// The ordered values: `Value::Null` stands for the previous (or current) value.
    values: Vec<Value>,
    /// The position of each value on the timeline.
    offsets: Option<Vec<f64>>,
}

impl KeyframeSet {
    pub fn new<V: Into<Value>>(values: Vec<V>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            offsets: None,
        }
    }

    pub fn get_values(&self) -> &Vec<Value> {
        &self.values
    }

    pub fn get_offsets(&self) -> Option<&Vec<f64>> {
        self.offsets.as_ref()
    }

    /// Sets the offsets of the values: they must be non-decreasing values within [0, 1].
    pub fn set_offsets(mut self, offsets: Vec<f64>) -> Self {
        self.offsets = Some(offsets.into_iter().map(|o| o.clamp(0.0, 1.0)).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replaces every `Value::Null` by the previous value, or by `current` for the first one.
    ///
    /// `current` is only called when needed.
    pub fn fill_nulls<F: FnOnce() -> Value>(&mut self, current: F) {
        let mut current = Some(current);
        for index in 0..self.values.len() {
            if self.values[index].is_null() {
                self.values[index] = match index {
                    0 => current.take().map(|f| f()).unwrap_or_default(),
                    _ => self.values[index - 1].clone(),
                };
            }
        }
    }

    /// Inserts a value at the beginning of the set (the offsets are reset to default).
    pub(crate) fn prepend(&mut self, value: Value) {
        self.values.insert(0, value);
        self.offsets = None;
    }

    /// Replaces the values (offsets are kept).
    pub(crate) fn set_values(&mut self, values: Vec<Value>) {
        self.values = values;
    }
}

impl From<Value> for KeyframeSet {
    fn from(value: Value) -> Self {
        KeyframeSet::new(vec![value])
    }
}

impl<V: Into<Value>> From<Vec<V>> for KeyframeSet {
    fn from(values: Vec<V>) -> Self {
        KeyframeSet::new(values)
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for KeyframeSet {
    fn from(values: [V; N]) -> Self {
        KeyframeSet::new(Vec::from(values))
    }
}

impl From<f64> for KeyframeSet {
    fn from(value: f64) -> Self {
        KeyframeSet::from(Value::from(value))
    }
}

impl From<i32> for KeyframeSet {
    fn from(value: i32) -> Self {
        KeyframeSet::from(Value::from(value))
    }
}

impl From<&str> for KeyframeSet {
    fn from(value: &str) -> Self {
        KeyframeSet::from(Value::from(value))
    }
}

// ########################################
// Keyframes

/// A function adjusting the call options for a given property.
#[derive(Clone)]
pub struct TimingOverride(Arc<dyn Fn(TimingConfig) -> TimingConfig + Send + Sync>);

impl TimingOverride {
    pub fn apply(&self, options: TimingConfig) -> TimingConfig {
        (self.0)(options)
    }
}

impl Debug for TimingOverride {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn")
    }
}

/// The keyframes of an animation call: an ordered list of properties with their [`KeyframeSet`].
///
/// # Example
/// ```
/// use kinetic::animations::Keyframes;
///
/// let keyframes = Keyframes::default()
///     .with_property("opacity", [0, 1])
///     .with_property("x", "100px")
///     // Override some of the timing options for this property only.
///     .with_property_options("scale", [1.0, 1.5], |options| options.set_duration(1000.0));
/// assert_eq!(keyframes.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Keyframes {
    properties: Vec<(String, KeyframeSet, Option<TimingOverride>)>,
}

impl Keyframes {
    /// Adds (or replaces) the keyframes of a property.
    pub fn with_property<S: Into<String>, K: Into<KeyframeSet>>(
        self,
        property: S,
        keyframes: K,
    ) -> Self {
        self.insert(property.into(), keyframes.into(), None)
    }

    /// Adds (or replaces) the keyframes of a property with its specific timing options: these are
    /// computed from the call options by `options`.
    pub fn with_property_options<S, K, F>(self, property: S, keyframes: K, options: F) -> Self
    where
        S: Into<String>,
        K: Into<KeyframeSet>,
        F: Fn(TimingConfig) -> TimingConfig + Send + Sync + 'static,
    {
        let options = TimingOverride(Arc::new(options));
        self.insert(property.into(), keyframes.into(), Some(options))
    }

    fn insert(
        mut self,
        property: String,
        keyframes: KeyframeSet,
        options: Option<TimingOverride>,
    ) -> Self {
        match self.properties.iter_mut().find(|(name, _, _)| *name == property) {
            Some(entry) => *entry = (property, keyframes, options),
            None => self.properties.push((property, keyframes, options)),
        }
        self
    }

    /// Returns the ordered properties.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &KeyframeSet, Option<&TimingOverride>)> {
        self.properties
            .iter()
            .map(|(property, keyframes, options)| (property, keyframes, options.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<S: Into<String>, K: Into<KeyframeSet>> From<(S, K)> for Keyframes {
    fn from((property, keyframes): (S, K)) -> Self {
        Keyframes::default().with_property(property, keyframes)
    }
}

// ########################################
// Interpolator

/// Maps a progress in [0, 1] to a value across ordered keyframes.
///
/// # Example
/// ```
/// use kinetic::animations::Interpolator;
/// use kinetic::utils::Value;
///
/// let interpolator = Interpolator::new(vec![Value::from(0), Value::from(100)], None, vec![]).unwrap();
/// assert_eq!(interpolator.interpolate(0.5), Value::Number(50.0));
/// ```
#[derive(Clone, Debug)]
pub struct Interpolator {
    values: Vec<Value>,
    offsets: Vec<f64>,
    /// Per-segment easings (linear when empty).
    easings: Vec<Easing>,
}

impl Interpolator {
    /// Builds an interpolator.
    ///
    /// # Parameters
    /// * `values`: the keyframe values (at least one)
    /// * `offsets`: the keyframe positions (evenly spread when missing)
    /// * `easings`: a single easing for every segment, or one easing per segment
    ///
    /// # Errors
    /// * `EmptyKeyframes`: `values` is empty.
    pub fn new(
        values: Vec<Value>,
        offsets: Option<Vec<f64>>,
        easings: Vec<Easing>,
    ) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(EmptyKeyframes {
                property: String::default(),
            }
            .into());
        }

        let offsets = match offsets {
            None => default_offsets(values.len()),
            Some(mut offsets) => {
                if offsets.is_empty() {
                    offsets.push(0.0);
                }
                let remaining = values.len().saturating_sub(offsets.len());
                fill_offsets(&mut offsets, remaining);
                offsets
            }
        };

        Ok(Self {
            values,
            offsets,
            easings,
        })
    }

    pub fn get_values(&self) -> &Vec<Value> {
        &self.values
    }

    pub fn get_offsets(&self) -> &Vec<f64> {
        &self.offsets
    }

    /// Returns the value at the given progress.
    pub fn interpolate(&self, p: f64) -> Value {
        let count = self.values.len();
        if count == 1 {
            return self.values[0].clone();
        }

        // Find the segment: the last one includes 1.
        let mut segment = 0;
        while segment < count - 2 && p >= self.offsets[segment + 1] {
            segment += 1;
        }

        let local = progress(
            self.offsets[segment],
            self.offsets[segment + 1],
            p,
        )
        .clamp(0.0, 1.0);
        let eased = match self.easings.len() {
            0 => local,
            len => self.easings[wrap(0, len, segment)].ease(local),
        };
        mix_values(&self.values[segment], &self.values[segment + 1], eased)
    }
}

/// Mixes two values: numeric values arithmetically (keeping their unit), others discretely.
fn mix_values(from: &Value, to: &Value, p: f64) -> Value {
    match (from.as_number(), to.as_number()) {
        (Some(a), Some(b)) => {
            let number = p.mix(a, b);
            match to.unit().or(from.unit()) {
                Some(unit) => Value::with_unit(number, unit),
                None => Value::Number(number),
            }
        }
        _ => match p <= 0.0 {
            true => from.clone(),
            false => to.clone(),
        },
    }
}
