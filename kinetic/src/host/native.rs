use crate::animations::{Direction, PlayState};
use crate::errors::Error;
use crate::utils::Value;

/// A callback called once when a native animation ends: `true` when it finished naturally,
/// `false` when it was cancelled.
pub type CompletionCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// An animation run by the host platform itself (timing and interpolation included).
pub trait NativeAnimation: Send + Sync {
    fn play(&self) -> Result<(), Error>;
    fn pause(&self);
    fn finish(&self) -> Result<(), Error>;
    fn cancel(&self);
    fn reverse(&self);
    /// Writes the current animated value to the target for good.
    fn commit_styles(&self) -> Result<(), Error>;

    fn get_current_time(&self) -> f64;
    fn set_current_time(&self, time: f64);
    fn get_playback_rate(&self) -> f64;
    fn set_playback_rate(&self, rate: f64);
    fn get_play_state(&self) -> PlayState;

    /// Registers the completion callback.
    ///
    /// Returns `false` if this backend cannot report completion (the callback is dropped).
    fn on_complete(&self, callback: CompletionCallback) -> bool;
}

/// The easing of a native animation, as the host understands it (`ease`, `steps(4, end)`,
/// `cubic-bezier(...)`, `linear(...)`).
#[derive(Clone, Debug, PartialEq)]
pub enum NativeEasing {
    Single(String),
    PerSegment(Vec<String>),
}

/// Describes the animation a host is asked to run natively.
///
/// Times are expressed in milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeRequest {
    pub property: String,
    pub keyframes: Vec<Value>,
    pub offsets: Option<Vec<f64>>,
    pub delay: f64,
    pub duration: f64,
    pub end_delay: f64,
    pub easing: NativeEasing,
    pub direction: Direction,
    /// Number of iterations (at least 1).
    pub iterations: u32,
    /// The animated value applies before and after the active time (`both`).
    pub fill: String,
}

impl NativeRequest {
    pub fn new<S: Into<String>>(property: S, keyframes: Vec<Value>) -> Self {
        Self {
            property: property.into(),
            keyframes,
            offsets: None,
            delay: 0.0,
            duration: 0.0,
            end_delay: 0.0,
            easing: NativeEasing::Single(String::from("linear")),
            direction: Direction::Normal,
            iterations: 1,
            fill: String::from("both"),
        }
    }

    pub fn set_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn set_easing<S: Into<String>>(mut self, easing: S) -> Self {
        self.easing = NativeEasing::Single(easing.into());
        self
    }
}
