//! Defines various utilities (runtime, scheduling, values) used across the crate.

#[cfg(test)]
pub use serial_test;
pub use tokio;
pub use tokio::time::sleep;

pub use helpers::Mix;
pub use scheduler::{FrameScheduler, Scheduler, TickCallback, TickId, VirtualClock};
pub use task::TaskHandler;
pub use value::Value;

pub mod helpers;
mod scheduler;
pub mod task;
mod value;
