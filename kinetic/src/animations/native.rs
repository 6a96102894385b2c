use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::animations::playback::Completion;
use crate::animations::{ApplyFn, Finished, PlayState, Playback};
use crate::errors::{Error, NativeError};
use crate::host::NativeAnimation;
use crate::utils::Value;

/// An animation delegated to the host platform.
///
/// The host runs the animation; this handle forwards the controls and turns the host completion
/// report into a [`Finished`] notification.
#[derive(Clone)]
pub struct NativePlayback {
    inner: Arc<NativeInner>,
}

struct NativeInner {
    animation: Box<dyn NativeAnimation>,
    duration: f64,
    completion: Completion,
    /// Created without autoplay and not played yet.
    held: AtomicBool,
}

impl NativePlayback {
    /// Wraps a native animation.
    ///
    /// # Parameters
    /// * `animation`: the animation the host started
    /// * `duration`: the duration of a single iteration (in ms)
    /// * `final_value`: the value the animation ends on
    /// * `on_finish`: when some, writes the final value for good once the animation finishes
    ///   (the native animation is then cancelled)
    ///
    /// # Errors
    /// * `NativeError`: the animation cannot report its completion.
    pub fn new(
        animation: Box<dyn NativeAnimation>,
        duration: f64,
        final_value: Value,
        on_finish: Option<ApplyFn>,
    ) -> Result<Self, Error> {
        let inner = Arc::new(NativeInner {
            animation,
            duration,
            completion: Completion::new(),
            held: AtomicBool::new(false),
        });

        let weak = Arc::downgrade(&inner);
        let registered = inner.animation.on_complete(Box::new(move |done| {
            let inner = match weak.upgrade() {
                None => return,
                Some(inner) => inner,
            };
            if !done {
                inner.completion.reject();
                return;
            }
            if let Some(apply) = on_finish {
                let written = apply(&final_value);
                inner.animation.cancel();
                if let Err(error) = written {
                    log::error!("Cannot write final value: {}", error);
                    inner.completion.fail(error);
                    return;
                }
            }
            inner.completion.resolve(final_value);
        }));

        match registered {
            true => Ok(Self { inner }),
            false => {
                inner.animation.cancel();
                Err(NativeError {
                    info: String::from("completion cannot be reported"),
                })
            }
        }
    }

    /// Pauses the host animation and reports it idle until it is played.
    pub fn hold(&self) {
        self.inner.animation.pause();
        self.inner.held.store(true, Ordering::SeqCst);
    }
}

impl Playback for NativePlayback {
    fn play(&self) -> Result<(), Error> {
        self.inner.held.store(false, Ordering::SeqCst);
        self.inner.animation.play()
    }

    fn pause(&self) {
        self.inner.animation.pause()
    }

    fn finish(&self) -> Result<(), Error> {
        self.inner.held.store(false, Ordering::SeqCst);
        self.inner.animation.finish()
    }

    fn stop(&self) {
        if let Err(error) = self.inner.animation.commit_styles() {
            log::warn!("Cannot commit native animation styles: {}", error);
        }
        self.inner.animation.cancel();
        self.inner.completion.reject();
    }

    fn cancel(&self) -> Result<(), Error> {
        self.inner.animation.cancel();
        self.inner.completion.reject();
        Ok(())
    }

    fn reverse(&self) {
        self.inner.animation.reverse()
    }

    fn commit_styles(&self) -> Result<(), Error> {
        self.inner.animation.commit_styles()
    }

    fn get_current_time(&self) -> f64 {
        self.inner.animation.get_current_time()
    }

    fn set_current_time(&self, time: f64) {
        self.inner.animation.set_current_time(time)
    }

    fn get_playback_rate(&self) -> f64 {
        self.inner.animation.get_playback_rate()
    }

    fn set_playback_rate(&self, rate: f64) {
        self.inner.animation.set_playback_rate(rate)
    }

    fn get_play_state(&self) -> PlayState {
        match self.inner.held.load(Ordering::SeqCst) {
            true => PlayState::Idle,
            false => self.inner.animation.get_play_state(),
        }
    }

    fn get_duration(&self) -> f64 {
        self.inner.duration
    }

    fn finished(&self) -> Finished {
        self.inner.completion.get_future()
    }

    fn as_native(&self) -> Option<&dyn NativeAnimation> {
        Some(self.inner.animation.as_ref())
    }
}

impl Debug for NativePlayback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativePlayback")
            .field("duration", &self.inner.duration)
            .field("state", &self.get_play_state())
            .finish()
    }
}

impl Display for NativePlayback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NativePlayback [duration={}ms, state={}]",
            self.inner.duration,
            self.get_play_state()
        )
    }
}
