use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::animations::playback::Completion;
use crate::animations::{
    Direction, Easing, EasingDefinition, Finished, Interpolator, KeyframeSet, PlayState, Playback,
    TimingConfig,
};
use crate::errors::Error;
use crate::utils::{Scheduler, TickId, Value};

/// Writes an animated value to its destination (a target property, a user callback...).
pub type ApplyFn = Box<dyn Fn(&Value) -> Result<(), Error> + Send + Sync + 'static>;

/// Represents an animation driven frame by frame: a value interpolated over time between keyframes.
///
/// - An animation can be played, paused, resumed, stopped, cancelled, finished and reversed.
/// - Each frame, the current progress is computed from the elapsed time, eased and interpolated;
///   the resulting value is handed to the `apply` callback.
/// - Cloning an `Animation` gives another handle to the same animation.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use kinetic::animations::{Animation, Easing, KeyframeSet, Playback, TimingConfig};
/// use kinetic::utils::{VirtualClock, Value};
///
/// let clock = Arc::new(VirtualClock::new(10.0));
/// let animation = Animation::new(
///     |value: &Value| {
///         println!("Value: {}", value);
///         Ok(())
///     },
///     KeyframeSet::from([0, 100]),
///     &TimingConfig::default().set_duration(1000.0).set_easing(Easing::Linear),
///     clock.clone(),
/// )
/// .unwrap();
///
/// clock.advance(500.0);
/// assert_eq!(animation.get_current_time(), 500.0);
/// ```
#[derive(Clone)]
pub struct Animation {
    inner: Arc<Inner>,
}

struct Inner {
    scheduler: Arc<dyn Scheduler>,
    interpolator: Interpolator,
    /// The easing applied over the whole timeline (segment easings live in the interpolator).
    easing: Easing,
    duration: f64,
    /// The duration of all iterations (delays excluded).
    total_duration: f64,
    delay: f64,
    end_delay: f64,
    repeat: u32,
    direction: Direction,
    apply: ApplyFn,
    timeline: RwLock<Timeline>,
    completion: Completion,
}

struct Timeline {
    state: PlayState,
    start_time: Option<f64>,
    pause_time: Option<f64>,
    rate: f64,
    /// The elapsed time at last tick.
    elapsed: f64,
    /// The frame to come, if any.
    tick: Option<TickId>,
    /// Incremented each time a frame is scheduled: outdated frames do nothing.
    frame: u64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            state: PlayState::Idle,
            start_time: None,
            pause_time: None,
            rate: 1.0,
            elapsed: 0.0,
            tick: None,
            frame: 0,
        }
    }
}

impl Animation {
    /// Creates an animation, and plays it unless the options disable autoplay (it then stays idle
    /// until [`Playback::play`]).
    ///
    /// # Parameters
    /// * `apply`: called with each computed value
    /// * `keyframes`: the values to go through (wildcards already resolved)
    /// * `options`: the timing options (a per-target delay resolves as for the first target)
    /// * `scheduler`: the frame scheduler driving the animation
    ///
    /// # Errors
    /// * `EmptyKeyframes`: there is no keyframe at all.
    /// * Any error raised by `apply` on the initial frame.
    pub fn new<F>(
        apply: F,
        keyframes: KeyframeSet,
        options: &TimingConfig,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, Error>
    where
        F: Fn(&Value) -> Result<(), Error> + Send + Sync + 'static,
    {
        let mut duration = options.get_duration();
        let mut values = keyframes.get_values().clone();
        let offsets = keyframes.get_offsets().cloned();

        // A single easing applies to the whole timeline, a list applies per segment.
        let (easing, segment_easings) = match options.get_easing() {
            EasingDefinition::Single(easing) => (easing.clone(), vec![]),
            EasingDefinition::PerSegment(easings) => (Easing::Linear, easings.clone()),
            EasingDefinition::Generator(generator) => {
                let generated = generator.create_animation(&values);
                if let Some(keyframes) = generated.keyframes {
                    values = keyframes;
                }
                if let Some(generated_duration) = generated.duration {
                    duration = generated_duration.max(0.0);
                }
                (generated.easing.unwrap_or(Easing::Linear), vec![])
            }
        };

        let interpolator = Interpolator::new(values, offsets, segment_easings)?;
        let repeat = options.get_repeat();
        let animation = Self {
            inner: Arc::new(Inner {
                scheduler,
                interpolator,
                easing,
                duration,
                total_duration: duration * (repeat as f64 + 1.0),
                delay: options.get_delay().resolve(0, 1).max(0.0),
                end_delay: options.get_end_delay(),
                repeat,
                direction: options.get_direction(),
                apply: Box::new(apply),
                timeline: RwLock::new(Timeline::default()),
                completion: Completion::new(),
            }),
        };

        if options.is_autoplay() {
            animation.play()?;
        }
        Ok(animation)
    }

    /// Returns the duration of all iterations (delays excluded, in ms).
    pub fn get_total_duration(&self) -> f64 {
        self.inner.total_duration
    }

    pub fn get_delay(&self) -> f64 {
        self.inner.delay
    }

    pub fn get_end_delay(&self) -> f64 {
        self.inner.end_delay
    }

    pub fn get_repeat(&self) -> u32 {
        self.inner.repeat
    }

    pub fn get_direction(&self) -> Direction {
        self.inner.direction
    }

    /// Returns the easing applied over the whole timeline.
    pub fn get_easing(&self) -> &Easing {
        &self.inner.easing
    }

    pub fn get_interpolator(&self) -> &Interpolator {
        &self.inner.interpolator
    }

    /// Indicates if a frame is scheduled.
    pub fn is_ticking(&self) -> bool {
        self.inner.timeline.read().tick.is_some()
    }
}

impl Inner {
    /// Computes the (eased) progress at the given elapsed time.
    ///
    /// Returns the active time (elapsed time after delay) along with the progress.
    fn progress_at(&self, elapsed: f64, finished: bool) -> (f64, f64) {
        let active = match finished {
            true => self.total_duration,
            false => (elapsed - self.delay).max(0.0),
        };

        let (iteration, mut local) = if active >= self.total_duration || self.duration <= 0.0 {
            (self.repeat as f64, 1.0)
        } else {
            let cycles = active / self.duration;
            let iteration = cycles.floor();
            let local = cycles - iteration;
            // Exactly on an iteration boundary: the previous iteration is done.
            match local == 0.0 && cycles >= 1.0 {
                true => (iteration - 1.0, 1.0),
                false => (iteration, local),
            }
        };

        if self.direction.is_backward(iteration) {
            local = 1.0 - local;
        }
        (active, local.min(1.0))
    }

    fn render(&self, progress: f64) -> Value {
        self.interpolator.interpolate(self.easing.ease(progress))
    }

    /// Computes and applies the value at `now`, then settles or schedules next frame.
    fn tick(self: &Arc<Self>, now: f64) -> Result<(), Error> {
        let (active, progress) = {
            let mut timeline = self.timeline.write();
            let elapsed = match timeline.pause_time {
                Some(pause_time) => pause_time,
                None => (now - timeline.start_time.unwrap_or(now)) * timeline.rate,
            };
            timeline.elapsed = elapsed;
            let finished = timeline.state == PlayState::Finished && timeline.pause_time.is_none();
            self.progress_at(elapsed, finished)
        };

        let value = self.render(progress);
        (self.apply)(&value)?;

        let mut timeline = self.timeline.write();
        let done = timeline.pause_time.is_none()
            && timeline.state != PlayState::Idle
            && (timeline.state == PlayState::Finished
                || active >= self.total_duration + self.end_delay);

        if done {
            timeline.state = PlayState::Finished;
            if let Some(id) = timeline.tick.take() {
                self.scheduler.cancel_tick(id);
            }
            drop(timeline);
            self.completion.resolve(value);
        } else if timeline.state == PlayState::Running {
            drop(timeline);
            self.schedule_frame()?;
        }
        Ok(())
    }

    /// Schedules the next frame (replacing the pending one, if any).
    fn schedule_frame(self: &Arc<Self>) -> Result<(), Error> {
        let mut timeline = self.timeline.write();
        if let Some(id) = timeline.tick.take() {
            self.scheduler.cancel_tick(id);
        }
        timeline.frame += 1;
        let frame = timeline.frame;
        let inner = self.clone();
        let id = self
            .scheduler
            .schedule_tick(Box::new(move |now| inner.on_frame(frame, now)))?;
        timeline.tick = Some(id);
        Ok(())
    }

    fn on_frame(self: &Arc<Self>, frame: u64, now: f64) {
        {
            let mut timeline = self.timeline.write();
            if timeline.frame != frame || timeline.state != PlayState::Running {
                return;
            }
            timeline.tick = None;
        }
        if let Err(error) = self.tick(now) {
            log::error!("Animation frame error: {}", error);
            self.halt();
            self.completion.fail(error);
        }
    }

    fn cancel_frame(&self, timeline: &mut Timeline) {
        if let Some(id) = timeline.tick.take() {
            self.scheduler.cancel_tick(id);
        }
        timeline.frame += 1;
    }

    /// Stops the frame loop where it is.
    fn halt(&self) {
        let mut timeline = self.timeline.write();
        self.cancel_frame(&mut timeline);
        timeline.state = PlayState::Idle;
        timeline.pause_time = None;
    }

    fn stop(&self) {
        self.halt();
        self.completion.reject();
    }

    fn current_time(&self, timeline: &Timeline) -> f64 {
        match (timeline.pause_time, timeline.start_time, timeline.state) {
            (Some(pause_time), _, _) => pause_time,
            (None, Some(start_time), PlayState::Running) => {
                (self.scheduler.now() - start_time) * timeline.rate
            }
            _ => timeline.elapsed,
        }
    }
}

impl Playback for Animation {
    fn play(&self) -> Result<(), Error> {
        let now = self.inner.scheduler.now();
        {
            let mut timeline = self.inner.timeline.write();
            match timeline.pause_time.take() {
                Some(pause_time) if timeline.rate != 0.0 => {
                    timeline.start_time = Some(now - pause_time / timeline.rate)
                }
                Some(_) => timeline.start_time = Some(now),
                None if timeline.state == PlayState::Finished || timeline.start_time.is_none() => {
                    timeline.start_time = Some(now)
                }
                None => {}
            }
            timeline.state = PlayState::Running;
        }
        self.inner.schedule_frame()
    }

    fn pause(&self) {
        let mut timeline = self.inner.timeline.write();
        let elapsed = self.inner.current_time(&timeline);
        timeline.pause_time = Some(elapsed);
        timeline.elapsed = elapsed;
        timeline.state = PlayState::Paused;
        self.inner.cancel_frame(&mut timeline);
    }

    fn finish(&self) -> Result<(), Error> {
        {
            let mut timeline = self.inner.timeline.write();
            timeline.pause_time = None;
            self.inner.cancel_frame(&mut timeline);
            timeline.state = PlayState::Finished;
        }
        self.inner.tick(self.inner.scheduler.now())
    }

    fn stop(&self) {
        self.inner.stop();
    }

    fn cancel(&self) -> Result<(), Error> {
        self.inner.stop();
        {
            let mut timeline = self.inner.timeline.write();
            timeline.elapsed = 0.0;
            timeline.start_time = None;
        }
        let (_, progress) = self.inner.progress_at(0.0, false);
        (self.inner.apply)(&self.inner.render(progress))
    }

    fn reverse(&self) {
        let now = self.inner.scheduler.now();
        let mut timeline = self.inner.timeline.write();
        let elapsed = self.inner.current_time(&timeline);
        timeline.rate = -timeline.rate;
        if timeline.pause_time.is_none() && timeline.rate != 0.0 {
            timeline.start_time = Some(now - elapsed / timeline.rate);
        }
    }

    fn commit_styles(&self) -> Result<(), Error> {
        // Every frame is already written to the target.
        Ok(())
    }

    fn get_current_time(&self) -> f64 {
        let timeline = self.inner.timeline.read();
        self.inner.current_time(&timeline)
    }

    fn set_current_time(&self, time: f64) {
        let now = self.inner.scheduler.now();
        let mut timeline = self.inner.timeline.write();
        timeline.elapsed = time;
        match timeline.pause_time.is_some() || timeline.rate == 0.0 {
            true => timeline.pause_time = Some(time),
            false => timeline.start_time = Some(now - time / timeline.rate),
        }
    }

    fn get_playback_rate(&self) -> f64 {
        self.inner.timeline.read().rate
    }

    fn set_playback_rate(&self, rate: f64) {
        let now = self.inner.scheduler.now();
        let mut timeline = self.inner.timeline.write();
        let elapsed = self.inner.current_time(&timeline);
        timeline.rate = rate;
        if timeline.pause_time.is_none() && rate != 0.0 && timeline.start_time.is_some() {
            timeline.start_time = Some(now - elapsed / rate);
        }
    }

    fn get_play_state(&self) -> PlayState {
        self.inner.timeline.read().state
    }

    fn get_duration(&self) -> f64 {
        self.inner.duration
    }

    fn finished(&self) -> Finished {
        self.inner.completion.get_future()
    }
}

impl Debug for Animation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("duration", &self.inner.duration)
            .field("repeat", &self.inner.repeat)
            .field("direction", &self.inner.direction)
            .field("state", &self.get_play_state())
            .finish()
    }
}

impl Display for Animation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Animation [duration={}ms, state={}]",
            self.inner.duration,
            self.get_play_state()
        )
    }
}
