//! Defines animations: values interpolated between keyframes over a timeline, run frame by frame
//! or delegated to the host.

mod animation;
mod easing;
mod group;
mod keyframe;
mod native;
mod playback;
mod timing;

pub use animation::{Animation, ApplyFn};
pub use easing::{Easing, EasingFunction, StepPosition};
pub use group::{AnimationGroup, GroupFinished};
pub use keyframe::{Interpolator, KeyframeSet, Keyframes, TimingOverride};
pub use native::NativePlayback;
pub use playback::{Finished, PlayState, Playback};
pub use timing::{
    stagger, Delay, DelayFunction, Direction, EasingDefinition, GeneratedAnimation, Generator,
    TimingConfig, DEFAULT_DURATION,
};
