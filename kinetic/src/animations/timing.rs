use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use crate::animations::Easing;
use crate::utils::Value;

/// Default duration of an animation (in ms).
pub const DEFAULT_DURATION: f64 = 300.0;

/// Playback direction of an animation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Normal,
    Reverse,
    /// Every odd iteration is played backward.
    Alternate,
    /// Every even iteration is played backward.
    AlternateReverse,
}

impl Direction {
    /// Indicates if the given (zero based) iteration is played backward.
    pub fn is_backward(&self, iteration: f64) -> bool {
        let odd = iteration.rem_euclid(2.0) == 1.0;
        match self {
            Direction::Normal => false,
            Direction::Reverse => true,
            Direction::Alternate => odd,
            Direction::AlternateReverse => !odd,
        }
    }

    /// Indicates if the last iteration is played backward, the animation then ending on its
    /// first keyframe.
    pub fn ends_backward(&self, repeat: u32) -> bool {
        self.is_backward(repeat as f64)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let direction = match self {
            Direction::Normal => "normal",
            Direction::Reverse => "reverse",
            Direction::Alternate => "alternate",
            Direction::AlternateReverse => "alternate-reverse",
        };
        write!(f, "{}", direction)
    }
}

impl From<&str> for Direction {
    fn from(value: &str) -> Self {
        match value {
            "reverse" => Direction::Reverse,
            "alternate" => Direction::Alternate,
            "alternate-reverse" => Direction::AlternateReverse,
            _ => Direction::Normal,
        }
    }
}

// ########################################
// Delay

/// A per-target delay function: `(index, total) -> delay in ms`.
#[derive(Clone)]
pub struct DelayFunction(Arc<dyn Fn(usize, usize) -> f64 + Send + Sync>);

impl Debug for DelayFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn")
    }
}

/// The delay before an animation starts (in ms).
#[derive(Clone, Debug)]
pub enum Delay {
    Fixed(f64),
    /// The delay depends on the index of the animated target among all targets of the call.
    PerTarget(DelayFunction),
}

impl Delay {
    pub fn per_target<F: Fn(usize, usize) -> f64 + Send + Sync + 'static>(function: F) -> Self {
        Delay::PerTarget(DelayFunction(Arc::new(function)))
    }

    /// Returns the delay for the target at `index` among `total` targets.
    pub fn resolve(&self, index: usize, total: usize) -> f64 {
        match self {
            Delay::Fixed(delay) => *delay,
            Delay::PerTarget(function) => (function.0)(index, total),
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Delay::Fixed(0.0)
    }
}

impl From<f64> for Delay {
    fn from(delay: f64) -> Self {
        Delay::Fixed(delay)
    }
}

impl From<u64> for Delay {
    fn from(delay: u64) -> Self {
        Delay::Fixed(delay as f64)
    }
}

/// Builds a delay growing by `step` ms for each target.
///
/// # Example
/// ```
/// use kinetic::animations::stagger;
///
/// let delay = stagger(100.0);
/// assert_eq!(delay.resolve(0, 3), 0.0);
/// assert_eq!(delay.resolve(2, 3), 200.0);
/// ```
pub fn stagger(step: f64) -> Delay {
    Delay::per_target(move |index, _| index as f64 * step)
}

// ########################################
// Easing definition

/// A pluggable generator computing the easing, keyframes and duration of an animation from its
/// requested keyframes (physics based easings typically).
pub trait Generator: Debug + Send + Sync {
    fn create_animation(&self, keyframes: &[Value]) -> GeneratedAnimation;
}

/// What a [`Generator`] computed: `None` fields keep the requested value.
#[derive(Clone, Debug, Default)]
pub struct GeneratedAnimation {
    pub easing: Option<Easing>,
    pub keyframes: Option<Vec<Value>>,
    pub duration: Option<f64>,
}

/// The easing of an animation.
#[derive(Clone, Debug)]
pub enum EasingDefinition {
    /// One easing applied over the whole animation.
    Single(Easing),
    /// One easing per keyframe segment (reused from the start when fewer than segments).
    PerSegment(Vec<Easing>),
    /// The easing is computed by a generator.
    Generator(Arc<dyn Generator>),
}

impl EasingDefinition {
    /// Indicates if a function easing is involved.
    pub fn has_function(&self) -> bool {
        match self {
            EasingDefinition::Single(easing) => easing.is_function(),
            EasingDefinition::PerSegment(easings) => easings.iter().any(Easing::is_function),
            EasingDefinition::Generator(_) => false,
        }
    }
}

impl Default for EasingDefinition {
    fn default() -> Self {
        EasingDefinition::Single(Easing::default())
    }
}

impl From<Easing> for EasingDefinition {
    fn from(easing: Easing) -> Self {
        EasingDefinition::Single(easing)
    }
}

impl From<&str> for EasingDefinition {
    fn from(easing: &str) -> Self {
        EasingDefinition::Single(Easing::from(easing))
    }
}

impl From<[f64; 4]> for EasingDefinition {
    fn from(points: [f64; 4]) -> Self {
        EasingDefinition::Single(Easing::from(points))
    }
}

impl From<Vec<Easing>> for EasingDefinition {
    fn from(easings: Vec<Easing>) -> Self {
        EasingDefinition::PerSegment(easings)
    }
}

// ########################################
// Timing configuration

/// Represents the timing options of an animation.
///
/// All durations are expressed in milliseconds.
///
/// # Example
/// ```
/// use kinetic::animations::{Direction, TimingConfig};
///
/// let options = TimingConfig::default()
///     .set_duration(1000.0)
///     .set_repeat(1)
///     .set_direction(Direction::Alternate)
///     .set_easing("ease-in-out");
/// assert_eq!(options.get_total_duration(), 2000.0);
/// ```
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Duration of a single iteration (default: 300ms).
    duration: f64,
    /// Delay before the animation starts (default: 0ms).
    delay: Delay,
    /// Delay after the animation ends, before it is considered finished (default: 0ms).
    end_delay: f64,
    /// Number of extra iterations (default: 0).
    repeat: u32,
    /// The easing (default: "ease").
    easing: EasingDefinition,
    direction: Direction,
    /// Starts playing on creation (default: true).
    autoplay: bool,
    /// Keeps the native animation alive once finished (default: false).
    persist: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            delay: Delay::default(),
            end_delay: 0.0,
            repeat: 0,
            easing: EasingDefinition::default(),
            direction: Direction::default(),
            autoplay: true,
            persist: false,
        }
    }
}

impl TimingConfig {
    /// Returns the duration of all iterations together (excluding delays).
    pub fn get_total_duration(&self) -> f64 {
        self.duration * (self.repeat as f64 + 1.0)
    }

    pub fn get_duration(&self) -> f64 {
        self.duration
    }
    pub fn set_duration(mut self, duration: f64) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    pub fn get_delay(&self) -> &Delay {
        &self.delay
    }
    pub fn set_delay<D: Into<Delay>>(mut self, delay: D) -> Self {
        self.delay = delay.into();
        self
    }

    pub fn get_end_delay(&self) -> f64 {
        self.end_delay
    }
    pub fn set_end_delay(mut self, end_delay: f64) -> Self {
        self.end_delay = end_delay;
        self
    }

    pub fn get_repeat(&self) -> u32 {
        self.repeat
    }
    pub fn set_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn get_easing(&self) -> &EasingDefinition {
        &self.easing
    }
    pub fn set_easing<E: Into<EasingDefinition>>(mut self, easing: E) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }
    pub fn set_direction<D: Into<Direction>>(mut self, direction: D) -> Self {
        self.direction = direction.into();
        self
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }
    pub fn set_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn is_persist(&self) -> bool {
        self.persist
    }
    pub fn set_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }
}
