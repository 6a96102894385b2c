use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use simple_easing::*;

use crate::utils::helpers::progress;

/// A user supplied easing function.
#[derive(Clone)]
pub struct EasingFunction(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl EasingFunction {
    pub fn call(&self, p: f64) -> f64 {
        (self.0)(p)
    }
}

impl Debug for EasingFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn")
    }
}

impl PartialEq for EasingFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Named cubic-bezier curves.
const EASE: [f64; 4] = [0.25, 0.1, 0.25, 1.0];
const EASE_IN: [f64; 4] = [0.42, 0.0, 1.0, 1.0];
const EASE_IN_OUT: [f64; 4] = [0.42, 0.0, 0.58, 1.0];
const EASE_OUT: [f64; 4] = [0.0, 0.0, 0.58, 1.0];

/// Cubic-bezier solver precision.
const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 12;
const NEWTON_ITERATIONS: usize = 4;

/// Interval between two samples when rendering a function as a native `linear(...)` easing (in ms).
const LINEAR_SAMPLE_INTERVAL: f64 = 15.0;

/// Where the jump happens in a [`Easing::Steps`] easing.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPosition {
    Start,
    #[default]
    End,
}

impl Display for StepPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StepPosition::Start => write!(f, "start"),
            StepPosition::End => write!(f, "end"),
        }
    }
}

/// Represents a set of easing function.
///
/// An easing function is a temporal function that takes a progress between 0 and 1 (beginning / end)
/// and associate to it an eased progress according to an ease curve.
///
/// Easings are built from:
/// - a name: `Easing::from("ease-in-out")` (`ease`, `ease-in`, `ease-out`, `ease-in-out`, `linear`)
/// - a steps definition: `Easing::from("steps(4, end)")`
/// - cubic-bezier control points: `Easing::from([0.25, 0.1, 0.25, 1.0])`
/// - a function: `Easing::custom(|p| p * p)`
///
/// Anything else resolves to [`Easing::Linear`].
///
/// See <https://easings.net> for a representation of the other easing methods.
#[derive(Default, Clone, Debug, PartialEq)]
pub enum Easing {
    /// Applies no transformation.
    Linear,
    /// `cubic-bezier(0.25, 0.1, 0.25, 1)` (default).
    #[default]
    Ease,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// A cubic-bezier curve defined by its control points `[x1, y1, x2, y2]`.
    CubicBezier([f64; 4]),
    /// A staircase of `n` steps.
    Steps(u32, StepPosition),
    /// A user defined function.
    Custom(EasingFunction),
    /// <https://easings.net/#easeInBack>
    BackIn,
    /// <https://easings.net/#easeInOutBack>
    BackInOut,
    /// <https://easings.net/#easeOutBack>
    BackOut,
    /// <https://easings.net/#easeInBounce>
    BounceIn,
    /// <https://easings.net/#easeInOutBounce>
    BounceInOut,
    /// <https://easings.net/#easeOutBounce>
    BounceOut,
    /// <https://easings.net/#easeInCirc>
    CircIn,
    /// <https://easings.net/#easeInOutCirc>
    CircInOut,
    /// <https://easings.net/#easeOutCirc>
    CircOut,
    /// <https://easings.net/#easeInCubic>
    CubicIn,
    /// <https://easings.net/#easeInOutCubic>
    CubicInOut,
    /// <https://easings.net/#easeOutCubic>
    CubicOut,
    /// <https://easings.net/#easeInElastic>
    ElasticIn,
    /// <https://easings.net/#easeInOutElastic>
    ElasticInOut,
    /// <https://easings.net/#easeOutElastic>
    ElasticOut,
    /// <https://easings.net/#easeInExpo>
    ExpoIn,
    /// <https://easings.net/#easeInOutExpo>
    ExpoInOut,
    /// <https://easings.net/#easeOutExpo>
    ExpoOut,
    /// <https://easings.net/#easeInQuad>
    QuadIn,
    /// <https://easings.net/#easeInOutQuad>
    QuadInOut,
    /// <https://easings.net/#easeOutQuad>
    QuadOut,
    /// <https://easings.net/#easeInQuart>
    QuartIn,
    /// <https://easings.net/#easeInOutQuart>
    QuartInOut,
    /// <https://easings.net/#easeOutQuart>
    QuartOut,
    /// <https://easings.net/#easeInQuint>
    QuintIn,
    /// <https://easings.net/#easeInOutQuint>
    QuintInOut,
    /// <https://easings.net/#easeOutQuint>
    QuintOut,
    /// <https://easings.net/#easeInSine>
    SineIn,
    /// <https://easings.net/#easeInOutSine>
    SineInOut,
    /// <https://easings.net/#easeOutSine>
    SineOut,
}

impl Easing {
    /// Creates an easing from a user function: the function is used unchanged.
    pub fn custom<F: Fn(f64) -> f64 + Send + Sync + 'static>(function: F) -> Self {
        Easing::Custom(EasingFunction(Arc::new(function)))
    }

    /// Call the easing function.
    pub fn ease(&self, p: f64) -> f64 {
        match self {
            Easing::Linear => p,
            Easing::Ease => cubic_bezier(EASE, p),
            Easing::EaseIn => cubic_bezier(EASE_IN, p),
            Easing::EaseOut => cubic_bezier(EASE_OUT, p),
            Easing::EaseInOut => cubic_bezier(EASE_IN_OUT, p),
            Easing::CubicBezier(points) => cubic_bezier(*points, p),
            Easing::Steps(steps, position) => self::steps(*steps, *position, p),
            Easing::Custom(function) => function.call(p),
            _ => self.call_curve(p as f32) as f64,
        }
    }

    /// Call one of the easings.net curves.
    fn call_curve(&self, t: f32) -> f32 {
        match self {
            Easing::BackIn => back_in(t),
            Easing::BackInOut => back_in_out(t),
            Easing::BackOut => back_out(t),
            Easing::BounceIn => bounce_in(t),
            Easing::BounceInOut => bounce_in_out(t),
            Easing::BounceOut => bounce_out(t),
            Easing::CircIn => circ_in(t),
            Easing::CircInOut => circ_in_out(t),
            Easing::CircOut => circ_out(t),
            Easing::CubicIn => cubic_in(t),
            Easing::CubicInOut => cubic_in_out(t),
            Easing::CubicOut => cubic_out(t),
            Easing::ElasticIn => elastic_in(t),
            Easing::ElasticInOut => elastic_in_out(t),
            Easing::ElasticOut => elastic_out(t),
            Easing::ExpoIn => expo_in(t),
            Easing::ExpoInOut => expo_in_out(t),
            Easing::ExpoOut => expo_out(t),
            Easing::QuadIn => quad_in(t),
            Easing::QuadInOut => quad_in_out(t),
            Easing::QuadOut => quad_out(t),
            Easing::QuartIn => quart_in(t),
            Easing::QuartInOut => quart_in_out(t),
            Easing::QuartOut => quart_out(t),
            Easing::QuintIn => quint_in(t),
            Easing::QuintInOut => quint_in_out(t),
            Easing::QuintOut => quint_out(t),
            Easing::SineIn => sine_in(t),
            Easing::SineInOut => sine_in_out(t),
            Easing::SineOut => sine_out(t),
            _ => t,
        }
    }

    /// Indicates if this easing can only be expressed as a function (no keyword or curve
    /// definition exists for it).
    pub fn is_function(&self) -> bool {
        !matches!(
            self,
            Easing::Linear
                | Easing::Ease
                | Easing::EaseIn
                | Easing::EaseOut
                | Easing::EaseInOut
                | Easing::CubicBezier(_)
                | Easing::Steps(_, _)
        )
    }

    /// Renders this easing the way a native backend understands it.
    ///
    /// Functions are sampled every 15ms over `duration` into a `linear(...)` expression when
    /// `linear_supported`, otherwise they degrade to `ease`.
    pub fn to_native(&self, duration: f64, linear_supported: bool) -> String {
        match self {
            Easing::Linear => String::from("linear"),
            Easing::Ease => String::from("ease"),
            Easing::EaseIn => String::from("ease-in"),
            Easing::EaseOut => String::from("ease-out"),
            Easing::EaseInOut => String::from("ease-in-out"),
            Easing::CubicBezier([x1, y1, x2, y2]) => {
                format!("cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            Easing::Steps(steps, position) => format!("steps({}, {})", steps, position),
            _ => match linear_supported {
                false => String::from("ease"),
                true => {
                    let count = ((duration / LINEAR_SAMPLE_INTERVAL).round() as usize).max(2);
                    let samples: Vec<String> = (0..count)
                        .map(|index| {
                            let p = progress(0.0, (count - 1) as f64, index as f64);
                            self.ease(p).to_string()
                        })
                        .collect();
                    format!("linear({})", samples.join(", "))
                }
            },
        }
    }
}

// ########################################
// Conversion helpers

impl From<&str> for Easing {
    fn from(name: &str) -> Self {
        let name = name.trim();
        match name {
            "linear" => Easing::Linear,
            "ease" => Easing::Ease,
            "ease-in" => Easing::EaseIn,
            "ease-out" => Easing::EaseOut,
            "ease-in-out" => Easing::EaseInOut,
            _ => parse_steps(name).unwrap_or(Easing::Linear),
        }
    }
}

impl From<String> for Easing {
    fn from(name: String) -> Self {
        Easing::from(name.as_str())
    }
}

impl From<[f64; 4]> for Easing {
    fn from(points: [f64; 4]) -> Self {
        Easing::CubicBezier(points)
    }
}

impl From<(f64, f64, f64, f64)> for Easing {
    fn from((x1, y1, x2, y2): (f64, f64, f64, f64)) -> Self {
        Easing::CubicBezier([x1, y1, x2, y2])
    }
}

/// Parses `steps(N)` or `steps(N, start|end)`.
fn parse_steps(definition: &str) -> Option<Easing> {
    let arguments = definition
        .strip_prefix("steps")?
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let mut arguments = arguments.split(',').map(str::trim);
    let steps = arguments.next()?.parse::<f64>().ok()?;
    if steps < 1.0 {
        return None;
    }
    let position = match arguments.next() {
        Some("start") => StepPosition::Start,
        _ => StepPosition::End,
    };
    Some(Easing::Steps(steps as u32, position))
}

// ########################################
// Curves

fn steps(steps: u32, position: StepPosition, p: f64) -> f64 {
    if p >= 1.0 {
        return 1.0;
    }
    let steps = steps.max(1) as f64;
    let value = match position {
        StepPosition::End => (p.min(0.999) * steps).floor(),
        StepPosition::Start => (p.max(0.001) * steps).ceil(),
    };
    (value / steps).clamp(0.0, 1.0)
}

/// Returns the x (or y) coordinate of a bezier curve at `t`, given the matching control
/// point coordinates.
fn calc_bezier(t: f64, a1: f64, a2: f64) -> f64 {
    (((1.0 - 3.0 * a2 + 3.0 * a1) * t + (3.0 * a2 - 6.0 * a1)) * t + 3.0 * a1) * t
}

fn bezier_slope(t: f64, a1: f64, a2: f64) -> f64 {
    3.0 * (1.0 - 3.0 * a2 + 3.0 * a1) * t * t + 2.0 * (3.0 * a2 - 6.0 * a1) * t + 3.0 * a1
}

/// Finds `t` such as `x(t) == x`.
fn solve_bezier_t(x: f64, x1: f64, x2: f64) -> f64 {
    let (mut lower, mut upper) = (0.0, 1.0);
    let mut t;
    let mut error;
    let mut iterations = 0;
    loop {
        t = lower + (upper - lower) / 2.0;
        error = calc_bezier(t, x1, x2) - x;
        if error > 0.0 {
            upper = t;
        } else {
            lower = t;
        }
        iterations += 1;
        if error.abs() <= SUBDIVISION_PRECISION || iterations >= SUBDIVISION_MAX_ITERATIONS {
            break;
        }
    }

    // Subdivision alone stops around 1e-4: refine.
    for _ in 0..NEWTON_ITERATIONS {
        if error.abs() <= SUBDIVISION_PRECISION {
            break;
        }
        let slope = bezier_slope(t, x1, x2);
        if slope == 0.0 {
            break;
        }
        let candidate = (t - error / slope).clamp(0.0, 1.0);
        let candidate_error = calc_bezier(candidate, x1, x2) - x;
        if candidate_error.abs() >= error.abs() {
            break;
        }
        t = candidate;
        error = candidate_error;
    }
    t
}

fn cubic_bezier([x1, y1, x2, y2]: [f64; 4], p: f64) -> f64 {
    if x1 == y1 && x2 == y2 {
        return p;
    }
    if p == 0.0 || p == 1.0 {
        return p;
    }
    calc_bezier(solve_bezier_t(p, x1, x2), y1, y2)
}
