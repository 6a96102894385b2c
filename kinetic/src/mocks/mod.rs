//! Mock hosts and targets used for testing without a rendering environment.

pub use host::{MockHost, MockNativeAnimation};
pub use target::MockTarget;

mod host;
mod target;
