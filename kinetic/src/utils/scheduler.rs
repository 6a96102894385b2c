//! Defines the frame scheduling abstraction driving manual animations.
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};

use crate::errors::Error;
use crate::utils::task;
use crate::utils::task::TaskHandler;

/// Identifies a scheduled tick (see [`Scheduler::cancel_tick`]).
pub type TickId = u64;

/// A callback to be called once on next frame with the frame timestamp (in ms).
pub type TickCallback = Box<dyn FnOnce(f64) + Send + 'static>;

/// Abstracts the host "next frame" callback mechanism.
pub trait Scheduler: Send + Sync {
    /// Returns the current timestamp (in ms).
    fn now(&self) -> f64;

    /// Registers a callback to be run once on next frame.
    fn schedule_tick(&self, callback: TickCallback) -> Result<TickId, Error>;

    /// Deregisters a scheduled callback: does nothing if the callback already ran.
    fn cancel_tick(&self, id: TickId);
}

// ########################################
// Real time scheduler.

/// A [`Scheduler`] running each frame as a task on the kinetic runtime.
///
/// # Example
/// ```
/// use kinetic::utils::{FrameScheduler, Scheduler};
/// # use kinetic::utils; // `#[kinetic::runtime]` resolves to `crate::utils` inside kinetic's own doctests.
///
/// #[kinetic::runtime]
/// async fn main() {
///     let scheduler = FrameScheduler::new(60);
///     scheduler.schedule_tick(Box::new(|now| println!("Frame at {}ms", now))).unwrap();
/// }
/// ```
#[derive(Clone)]
pub struct FrameScheduler {
    /// Frames per second.
    fps: u16,
    /// The timestamp origin.
    origin: Instant,
    /// Handlers of the frames to come.
    pending: Arc<Mutex<BTreeMap<TickId, TaskHandler>>>,
    next_id: Arc<AtomicU64>,
}

impl FrameScheduler {
    pub fn new(fps: u16) -> Self {
        Self {
            fps: fps.max(1),
            origin: Instant::now(),
            pending: Default::default(),
            next_id: Default::default(),
        }
    }

    /// Returns the number of frames per second.
    pub fn get_fps(&self) -> u16 {
        self.fps
    }

    /// Returns the duration of a single frame (in ms).
    pub fn get_frame_duration(&self) -> u64 {
        1000 / self.fps as u64
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Debug for FrameScheduler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("fps", &self.fps)
            .field("pending", &self.pending.lock().len())
            .finish()
    }
}

impl Scheduler for FrameScheduler {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn schedule_tick(&self, callback: TickCallback) -> Result<TickId, Error> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let frame = self.get_frame_duration();
        let origin = self.origin;
        let pending = self.pending.clone();

        // Lock before spawning: the task cannot remove its entry before it exists.
        let mut lock = self.pending.lock();
        let handler = task::run(async move {
            crate::pause!(frame);
            // Once removed, the frame can no longer be cancelled.
            if pending.lock().remove(&id).is_some() {
                callback(origin.elapsed().as_secs_f64() * 1000.0);
            }
        })?;
        lock.insert(id, handler);
        Ok(id)
    }

    fn cancel_tick(&self, id: TickId) {
        if let Some(handler) = self.pending.lock().remove(&id) {
            handler.abort();
        }
    }
}

// ########################################
// Deterministic scheduler.

/// A deterministic [`Scheduler`]: time only moves when told to.
///
/// Callbacks scheduled during a frame are run on the next one.
///
/// # Example
/// ```
/// use kinetic::utils::{Scheduler, VirtualClock};
///
/// let clock = VirtualClock::new(10.0);
/// clock.schedule_tick(Box::new(|now| assert_eq!(now, 10.0))).unwrap();
/// clock.advance(10.0);
/// assert_eq!(clock.now(), 10.0);
/// ```
#[derive(Clone)]
pub struct VirtualClock {
    /// Duration of a frame (in ms).
    frame: f64,
    now: Arc<RwLock<f64>>,
    pending: Arc<Mutex<BTreeMap<TickId, TickCallback>>>,
    next_id: Arc<AtomicU64>,
}

impl VirtualClock {
    /// Creates a clock at timestamp 0, stepping `frame` ms per frame.
    pub fn new(frame: f64) -> Self {
        Self {
            frame,
            now: Arc::new(RwLock::new(0.0)),
            pending: Default::default(),
            next_id: Default::default(),
        }
    }

    /// Moves time forward by one frame and runs the callbacks pending at that point.
    pub fn step(&self) {
        *self.now.write() += self.frame;
        self.run_pending();
    }

    /// Moves time forward by `ms` milliseconds, one frame at a time.
    ///
    /// The last frame may be shorter so that the clock ends exactly `ms` later.
    pub fn advance(&self, ms: f64) {
        let target = *self.now.read() + ms;
        while *self.now.read() < target {
            let next = (*self.now.read() + self.frame).min(target);
            *self.now.write() = next;
            self.run_pending();
        }
    }

    /// Moves time to an absolute timestamp without running any frame.
    pub fn set_now(&self, now: f64) {
        *self.now.write() = now;
    }

    /// Returns the number of callbacks waiting for next frame.
    pub fn get_pending(&self) -> usize {
        self.pending.lock().len()
    }

    fn run_pending(&self) {
        // Callbacks are taken out first: they may schedule (or cancel) frames themselves.
        let callbacks = std::mem::take(&mut *self.pending.lock());
        let now = *self.now.read();
        for (_, callback) in callbacks {
            callback(now);
        }
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl Debug for VirtualClock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualClock")
            .field("now", &*self.now.read())
            .field("frame", &self.frame)
            .field("pending", &self.pending.lock().len())
            .finish()
    }
}

impl Scheduler for VirtualClock {
    fn now(&self) -> f64 {
        *self.now.read()
    }

    fn schedule_tick(&self, callback: TickCallback) -> Result<TickId, Error> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.pending.lock().insert(id, callback);
        Ok(id)
    }

    fn cancel_tick(&self, id: TickId) {
        self.pending.lock().remove(&id);
    }
}
