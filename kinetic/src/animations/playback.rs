use std::fmt::{Display, Formatter};

use futures::channel::oneshot;
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use parking_lot::Mutex;

use crate::errors::{Cancelled, Error, Rejection};
use crate::host::NativeAnimation;
use crate::utils::Value;

/// The completion notification of an animation: resolves with the final value on natural finish,
/// rejects with [`Cancelled`] on stop/cancel, or with [`Failed`](Rejection::Failed) when a frame
/// cannot be written.
///
/// The future can be cloned and awaited many times: it always yields the same outcome.
pub type Finished = Shared<BoxFuture<'static, Result<Value, Rejection>>>;

/// Lists the play states of an animation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl Display for PlayState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            PlayState::Idle => "idle",
            PlayState::Running => "running",
            PlayState::Paused => "paused",
            PlayState::Finished => "finished",
        };
        write!(f, "{}", state)
    }
}

/// The controls shared by every animation handle.
///
/// Times are expressed in milliseconds.
pub trait Playback: Send + Sync {
    /// Starts or resumes the animation.
    fn play(&self) -> Result<(), Error>;
    /// Pauses the animation: it resumes where it stopped on next [`Playback::play`].
    fn pause(&self);
    /// Jumps to the end of the animation and resolves its completion.
    fn finish(&self) -> Result<(), Error>;
    /// Stops the animation where it is and rejects its completion.
    fn stop(&self);
    /// Stops the animation and restores the value at the beginning of the timeline.
    fn cancel(&self) -> Result<(), Error>;
    /// Flips the playback direction.
    ///
    /// The current time is kept: the animation goes back from where it is, without jumping.
    fn reverse(&self);
    /// Writes the current animated value to the target for good.
    fn commit_styles(&self) -> Result<(), Error>;

    fn get_current_time(&self) -> f64;
    fn set_current_time(&self, time: f64);
    fn get_playback_rate(&self) -> f64;
    fn set_playback_rate(&self, rate: f64);
    fn get_play_state(&self) -> PlayState;
    /// Returns the duration of a single iteration.
    fn get_duration(&self) -> f64;
    /// Returns the completion notification.
    fn finished(&self) -> Finished;

    /// Returns the native animation driving this handle, if any.
    fn as_native(&self) -> Option<&dyn NativeAnimation> {
        None
    }
}

/// Single-resolution completion notification.
pub(crate) struct Completion {
    sender: Mutex<Option<oneshot::Sender<Result<Value, Rejection>>>>,
    future: Finished,
}

impl Completion {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = oneshot::channel();
        // A dropped sender means the animation is gone before its end.
        let future = receiver
            .map(|result| result.unwrap_or(Err(Cancelled)))
            .boxed()
            .shared();
        Self {
            sender: Mutex::new(Some(sender)),
            future,
        }
    }

    /// Resolves the notification: returns false if it was already settled.
    pub(crate) fn resolve(&self, value: Value) -> bool {
        self.settle(Ok(value))
    }

    /// Rejects the notification as cancelled: returns false if it was already settled.
    pub(crate) fn reject(&self) -> bool {
        self.settle(Err(Cancelled))
    }

    /// Rejects the notification with an error: returns false if it was already settled.
    pub(crate) fn fail(&self, error: Error) -> bool {
        self.settle(Err(Rejection::from(error)))
    }

    pub(crate) fn get_future(&self) -> Finished {
        self.future.clone()
    }

    fn settle(&self, result: Result<Value, Rejection>) -> bool {
        match self.sender.lock().take() {
            None => false,
            Some(sender) => sender.send(result).is_ok(),
        }
    }
}
