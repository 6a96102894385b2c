//! Defines the interfaces to the host rendering environment.
//!
//! The engine never talks to a platform directly: the embedding application implements
//! [`Target`] for its renderable objects and [`Host`] for the platform capabilities.

use std::sync::Arc;

pub use capabilities::{Capabilities, Capability};
pub use native::{CompletionCallback, NativeAnimation, NativeEasing, NativeRequest};
pub use target::{Target, Targets};

use crate::errors::{Error, NativeError};
use crate::utils::Value;

mod capabilities;
mod native;
mod target;

/// Describes a typed custom property to register with the host.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDefinition {
    pub name: String,
    /// The value syntax (`<length-percentage>`, `<angle>`, `<number>`...), if known.
    pub syntax: Option<String>,
    pub initial_value: Option<Value>,
    pub inherits: bool,
}

/// The host rendering environment.
///
/// Every capability defaults to "unsupported": a host implementing none of the methods only gets
/// manual (frame driven) animations.
pub trait Host: Send + Sync {
    /// Indicates if the host can run animations natively.
    fn supports_native_animation(&self) -> bool {
        false
    }

    /// Indicates if the host supports typed custom properties.
    fn supports_property_registration(&self) -> bool {
        false
    }

    /// Registers a typed custom property.
    fn register_property(&self, _definition: &PropertyDefinition) -> Result<(), Error> {
        Ok(())
    }

    /// Starts a native animation on the target.
    fn animate_native(
        &self,
        _target: &Arc<dyn Target>,
        request: NativeRequest,
    ) -> Result<Box<dyn NativeAnimation>, Error> {
        Err(NativeError {
            info: format!("cannot animate '{}': not supported", request.property),
        })
    }

    /// Creates a throwaway target used to probe native capabilities.
    fn create_probe_target(&self) -> Option<Arc<dyn Target>> {
        None
    }
}

/// A host without any platform capability.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessHost;

impl Host for HeadlessHost {}
