#![doc(html_root_url = "https://docs.rs/kinetic/0.1.0")]

//! <h1 align="center">KINETIC - Animate visual properties, natively or frame by frame</h1>
//! <div style="text-align:center;font-style:italic;">Kinetic is a small animation engine - written in Rust.</div>
//! <br/>
//!
//! # Documentation
//!
//! This is the API documentation.<br/>
//! To see the code in action, visit the [examples](https://github.com/dclause/kinetic/tree/develop/kinetic/examples) directory.
//!
//! # Features
//!
//! **Kinetic** animates the visual properties (opacity, size, transforms, etc.) of the objects of a
//! host rendering environment, or any value at all.
//!
//! - Describe [`Keyframes`](animations::Keyframes) per property, with offsets and easings
//!   ([`Easing`](animations::Easing): named curves, cubic-bezier, steps, custom functions)
//! - Tune the timeline with a [`TimingConfig`](animations::TimingConfig): duration, delay, repeat,
//!   direction, staggering across targets
//! - Control the result through an [`AnimationGroup`](animations::AnimationGroup): play, pause,
//!   reverse, seek, finish, stop, cancel, and await its completion
//! - Compose independent transforms (`x`, `scale`, `rotate`...) on a single target
//! - Delegate to the host when it can run animations natively ([`Host`](host::Host)),
//!   or run them frame by frame otherwise
//!
//! # Getting Started
//!
//! - Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! kinetic = "0.1.0"
//! ```
//!
//! - Implement [`Target`](host::Target) for the objects you wish to animate, and
//!   [`Host`](host::Host) for your platform capabilities (or use [`HeadlessHost`](host::HeadlessHost)).
//!
//! The following code demonstrates the simplest program we could imagine: print a value going
//! from 0 to 100 in one second.
//! ```rust
//! use kinetic::Animator;
//! use kinetic::animations::TimingConfig;
//! use kinetic::utils::Value;
//! # use kinetic::utils; // `#[kinetic::runtime]` resolves to `crate::utils` inside kinetic's own doctests.
//!
//! #[kinetic::runtime]
//! async fn main() {
//!     let animator = Animator::headless();
//!
//!     let group = animator
//!         .animate_value(
//!             [0, 100],
//!             |value: Value| println!("Value: {}", value),
//!             TimingConfig::default().set_duration(1000.0),
//!         )
//!         .unwrap();
//!
//!     // Waits for the animation end.
//!     let _ = group.finished().await;
//! }
//! ```
//!
//! # Feature flags
//!
//! - **serde** -- Enables serialize/deserialize capabilities for values, keyframes and states.
//! - **mocks** -- Provides mocked hosts and targets (useful for tests mostly).

#[cfg(test)]
extern crate self as kinetic;

pub mod animations;
mod engine;
pub mod errors;
pub mod host;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod style;
pub mod utils;

pub use engine::Animator;
pub use kinetic_macros::runtime;
