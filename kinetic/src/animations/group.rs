use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, OnceLock};

use futures::future::{try_join_all, BoxFuture, Shared};
use futures::FutureExt;

use crate::animations::{PlayState, Playback};
use crate::errors::{Error, Rejection};
use crate::host::NativeAnimation;
use crate::utils::Value;

/// The completion notification of a group: resolves with every final value (in member order) once
/// all members finished, or rejects as soon as one of them is cancelled.
pub type GroupFinished = Shared<BoxFuture<'static, Result<Vec<Value>, Rejection>>>;

/// Controls every animation created by a single `animate` call as one.
///
/// Contrary to its members, a group expresses its time values in seconds.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use kinetic::Animator;
/// use kinetic::animations::TimingConfig;
/// use kinetic::host::HeadlessHost;
/// use kinetic::utils::VirtualClock;
///
/// let clock = Arc::new(VirtualClock::new(10.0));
/// let animator = Animator::new(Arc::new(HeadlessHost), clock.clone());
/// let group = animator
///     .animate_value([0, 100], |value| println!("{}", value), TimingConfig::default().set_duration(500.0))
///     .unwrap();
///
/// assert_eq!(group.len(), 1);
/// assert_eq!(group.get_duration(), 0.5);
/// clock.advance(250.0);
/// assert_eq!(group.get_current_time(), 0.25);
/// group.stop();
/// ```
pub struct AnimationGroup {
    animations: Vec<Arc<dyn Playback>>,
    /// The group duration (in ms).
    duration: f64,
    finished: OnceLock<GroupFinished>,
}

impl AnimationGroup {
    /// Creates a group: its duration is the longest of `duration` and every member duration (in ms).
    pub fn new(animations: Vec<Arc<dyn Playback>>, duration: f64) -> Self {
        let duration = animations
            .iter()
            .map(|animation| animation.get_duration())
            .fold(duration, f64::max);
        Self {
            animations,
            duration,
            finished: OnceLock::new(),
        }
    }

    pub fn get_animations(&self) -> &Vec<Arc<dyn Playback>> {
        &self.animations
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Returns the group duration (in seconds).
    pub fn get_duration(&self) -> f64 {
        self.duration / 1000.0
    }

    /// Returns the current time of the first member (in seconds).
    pub fn get_current_time(&self) -> f64 {
        self.animations
            .first()
            .map(|animation| animation.get_current_time() / 1000.0)
            .unwrap_or_default()
    }

    /// Moves every member to the given time (in seconds).
    pub fn set_current_time(&self, time: f64) {
        for animation in &self.animations {
            animation.set_current_time(time * 1000.0);
        }
    }

    /// Returns the playback rate of the first member.
    pub fn get_playback_rate(&self) -> f64 {
        self.animations
            .first()
            .map(|animation| animation.get_playback_rate())
            .unwrap_or(1.0)
    }

    pub fn set_playback_rate(&self, rate: f64) {
        for animation in &self.animations {
            animation.set_playback_rate(rate);
        }
    }

    /// Returns the play state of the first member.
    pub fn get_play_state(&self) -> PlayState {
        self.animations
            .first()
            .map(|animation| animation.get_play_state())
            .unwrap_or_default()
    }

    /// Returns the combined completion notification (built once, then shared).
    pub fn finished(&self) -> GroupFinished {
        self.finished
            .get_or_init(|| {
                let futures = self
                    .animations
                    .iter()
                    .map(|animation| animation.finished())
                    .collect::<Vec<_>>();
                try_join_all(futures).boxed().shared()
            })
            .clone()
    }

    pub fn play(&self) -> Result<(), Error> {
        self.try_for_each(|animation| animation.play())
    }

    pub fn pause(&self) {
        for animation in &self.animations {
            animation.pause();
        }
    }

    pub fn finish(&self) -> Result<(), Error> {
        self.try_for_each(|animation| animation.finish())
    }

    /// Stops every member still going (native ones keep their current styles).
    pub fn stop(&self) {
        for animation in &self.animations {
            if animation.get_play_state() != PlayState::Finished {
                animation.stop();
            }
        }
    }

    pub fn cancel(&self) -> Result<(), Error> {
        self.try_for_each(|animation| animation.cancel())
    }

    pub fn reverse(&self) {
        for animation in &self.animations {
            animation.reverse();
        }
    }

    pub fn commit_styles(&self) -> Result<(), Error> {
        self.try_for_each(|animation| animation.commit_styles())
    }

    /// Runs `f` on every native member.
    pub fn for_each_native<F: FnMut(&dyn NativeAnimation)>(&self, mut f: F) {
        for animation in &self.animations {
            if let Some(native) = animation.as_native() {
                f(native);
            }
        }
    }

    /// Runs `f` on every member, then returns the first error raised (if any).
    fn try_for_each<F>(&self, f: F) -> Result<(), Error>
    where
        F: Fn(&Arc<dyn Playback>) -> Result<(), Error>,
    {
        let mut result = Ok(());
        for animation in &self.animations {
            if let Err(error) = f(animation) {
                if result.is_ok() {
                    result = Err(error);
                }
            }
        }
        result
    }
}

impl Debug for AnimationGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationGroup")
            .field("animations", &self.animations.len())
            .field("duration", &self.duration)
            .finish()
    }
}

impl Display for AnimationGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AnimationGroup [animations={}, duration={}s, state={}]",
            self.animations.len(),
            self.get_duration(),
            self.get_play_state()
        )
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use parking_lot::Mutex;
    use serial_test::serial;

    use super::*;
    use crate::animations::{Animation, Easing, KeyframeSet, NativePlayback, TimingConfig};
    use crate::errors::Cancelled;
    use crate::host::{Host, NativeRequest, Target};
    use crate::mocks::{MockHost, MockTarget};
    use crate::utils::{FrameScheduler, Scheduler, VirtualClock};

    fn member(duration: f64, scheduler: Arc<dyn Scheduler>) -> Arc<dyn Playback> {
        let options = TimingConfig::default()
            .set_duration(duration)
            .set_easing(Easing::Linear);
        let animation = Animation::new(
            |_: &Value| Ok(()),
            KeyframeSet::from([0, 1]),
            &options,
            scheduler,
        )
        .unwrap();
        Arc::new(animation)
    }

    fn group(clock: &Arc<VirtualClock>) -> AnimationGroup {
        AnimationGroup::new(
            vec![
                member(100.0, clock.clone()),
                member(200.0, clock.clone()),
                member(300.0, clock.clone()),
            ],
            0.0,
        )
    }

    #[test]
    fn test_group_finished() {
        let clock = Arc::new(VirtualClock::new(10.0));
        let group = group(&clock);
        assert_eq!(group.len(), 3);
        assert_eq!(group.get_duration(), 0.3);

        clock.advance(250.0);
        assert!(group.finished().now_or_never().is_none());
        clock.advance(60.0);
        assert_eq!(
            block_on(group.finished()),
            Ok(vec![Value::from(1), Value::from(1), Value::from(1)])
        );
    }

    #[test]
    fn test_group_rejects_on_cancel() {
        let clock = Arc::new(VirtualClock::new(10.0));
        let group = group(&clock);
        clock.advance(50.0);
        group.get_animations()[1].stop();
        assert_eq!(block_on(group.finished()), Err(Cancelled));
        // Siblings keep going.
        assert_eq!(group.get_animations()[2].get_play_state(), PlayState::Running);
    }

    #[test]
    fn test_group_time_in_seconds() {
        let clock = Arc::new(VirtualClock::new(10.0));
        let group = group(&clock);
        clock.advance(50.0);
        assert_eq!(group.get_current_time(), 0.05);

        group.set_current_time(0.125);
        assert_eq!(group.get_animations()[2].get_current_time(), 125.0);

        group.set_playback_rate(2.0);
        assert_eq!(group.get_playback_rate(), 2.0);
        assert!(group
            .get_animations()
            .iter()
            .all(|animation| animation.get_playback_rate() == 2.0));
    }

    #[test]
    fn test_group_controls() {
        let clock = Arc::new(VirtualClock::new(10.0));
        let group = group(&clock);
        assert_eq!(group.get_play_state(), PlayState::Running);

        group.pause();
        assert_eq!(group.get_play_state(), PlayState::Paused);
        group.play().unwrap();
        assert_eq!(group.get_play_state(), PlayState::Running);

        group.finish().unwrap();
        assert!(group
            .get_animations()
            .iter()
            .all(|animation| animation.get_play_state() == PlayState::Finished));
        assert!(block_on(group.finished()).is_ok());
    }

    #[test]
    fn test_group_stop_skips_finished() {
        let clock = Arc::new(VirtualClock::new(10.0));
        let group = group(&clock);
        clock.advance(150.0);
        group.stop();

        let states = group
            .get_animations()
            .iter()
            .map(|animation| animation.get_play_state())
            .collect::<Vec<_>>();
        assert_eq!(
            states,
            vec![PlayState::Finished, PlayState::Idle, PlayState::Idle]
        );
        assert_eq!(
            block_on(group.get_animations()[0].finished()),
            Ok(Value::from(1))
        );
    }

    #[test]
    fn test_empty_group() {
        let group = AnimationGroup::new(vec![], 500.0);
        assert!(group.is_empty());
        assert_eq!(group.get_duration(), 0.5);
        assert_eq!(group.get_current_time(), 0.0);
        assert_eq!(group.get_playback_rate(), 1.0);
        assert_eq!(group.get_play_state(), PlayState::Idle);
        assert_eq!(block_on(group.finished()), Ok(vec![]));
        assert_eq!(
            group.to_string(),
            "AnimationGroup [animations=0, duration=0.5s, state=idle]"
        );
    }

    #[test]
    fn test_for_each_native() {
        let clock = Arc::new(VirtualClock::new(10.0));
        let host = MockHost::native();
        let target: Arc<dyn Target> = Arc::new(MockTarget::default());
        let request = NativeRequest::new("opacity", vec![Value::from(0), Value::from(1)]);
        let native = host.animate_native(&target, request).unwrap();
        let native = NativePlayback::new(native, 300.0, Value::from(1), None).unwrap();

        let group = AnimationGroup::new(vec![member(100.0, clock), Arc::new(native)], 0.0);
        let count = Mutex::new(0);
        group.for_each_native(|animation| {
            animation.pause();
            *count.lock() += 1;
        });
        assert_eq!(*count.lock(), 1);
        assert_eq!(
            host.get_native_animations()[0].get_play_state(),
            PlayState::Paused
        );
    }

    #[kinetic_macros::test]
    #[serial]
    async fn test_group_real_time() {
        let scheduler: Arc<dyn Scheduler> = Arc::new(FrameScheduler::new(100));
        let group = AnimationGroup::new(
            vec![
                member(100.0, scheduler.clone()),
                member(300.0, scheduler.clone()),
            ],
            0.0,
        );

        let start = std::time::Instant::now();
        let values = group.finished().await.unwrap();
        let elapsed = start.elapsed().as_millis();
        assert_eq!(values, vec![Value::from(1), Value::from(1)]);
        assert!(
            (290..600).contains(&elapsed),
            "Group finished in {}ms",
            elapsed
        );
    }
}
