//! Defines the value adapter: how visual properties are read from and written to targets.
//!
//! Most properties are read and written as is. Composable transforms (`translateX`, `scale`,
//! `rotate`...) are stored in their own custom property instead, and the target `transform` is
//! rebuilt to combine them: this way, each of them can be animated independently.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

pub use registry::Registry;
pub use transform::{
    custom_name, definition, is_composable, is_custom, render, resolve_alias, TransformDefinition,
};

use crate::animations::Playback;
use crate::errors::Error;
use crate::host::{Capabilities, Capability, Host, PropertyDefinition, Target};
use crate::utils::Value;

mod registry;
mod transform;

/// Reads and writes visual properties on targets, composing transforms on the way.
pub struct Style {
    host: Arc<dyn Host>,
    capabilities: Arc<Capabilities>,
    registry: Mutex<Registry>,
    /// Whether each custom property registration succeeded.
    registered: Mutex<HashMap<String, bool>>,
}

impl Style {
    pub fn new(host: Arc<dyn Host>, capabilities: Arc<Capabilities>) -> Self {
        Self {
            host,
            capabilities,
            registry: Default::default(),
            registered: Default::default(),
        }
    }

    /// Returns the property actually written on the target for a given name: shorthands resolved,
    /// composable transforms moved to their custom property.
    pub fn get_storage_name(name: &str) -> String {
        let name = resolve_alias(name);
        match is_composable(name) {
            true => custom_name(name),
            false => name.to_string(),
        }
    }

    /// Reads a visual property.
    ///
    /// Composable transforms without value yet read as their initial value (`0px`, `1`, `0deg`).
    ///
    /// # Errors
    /// When the target cannot resolve the property.
    pub fn get(&self, target: &Arc<dyn Target>, name: &str) -> Result<Option<Value>, Error> {
        let name = resolve_alias(name);
        let value = target.get_style(&Self::get_storage_name(name))?;
        Ok(value.or_else(|| definition(name).map(|definition| definition.initial_value)))
    }

    /// Writes a visual property (composing the target `transform` if needed).
    pub fn set(&self, target: &Arc<dyn Target>, name: &str, value: &Value) -> Result<(), Error> {
        let name = resolve_alias(name);
        self.compose(target, name)?;
        target.set_style(&Self::get_storage_name(name), value)
    }

    /// Adds a composable transform to the target `transform` (once per target and property).
    pub fn compose(&self, target: &Arc<dyn Target>, name: &str) -> Result<(), Error> {
        let name = resolve_alias(name);
        if !is_composable(name) {
            return Ok(());
        }
        let transforms = {
            let mut registry = self.registry.lock();
            match registry.add_transform(target, name) {
                false => return Ok(()),
                true => registry.get_transforms(target),
            }
        };
        target.set_style("transform", &Value::from(render(&transforms)))
    }

    /// Registers the custom property behind a composable transform with the host (once per name).
    ///
    /// Returns whether the property is registered: `false` when the host cannot register
    /// properties or refused this one.
    pub fn register(&self, name: &str) -> bool {
        let name = resolve_alias(name);
        let definition = match definition(name) {
            None => return false,
            Some(definition) => definition,
        };
        if !self.capabilities.supports(Capability::PropertyRegistration) {
            return false;
        }

        let custom = custom_name(name);
        let mut registered = self.registered.lock();
        if let Some(result) = registered.get(&custom) {
            return *result;
        }
        let result = self.host.register_property(&PropertyDefinition {
            name: custom.clone(),
            syntax: Some(definition.syntax.to_string()),
            initial_value: Some(definition.initial_value),
            inherits: false,
        });
        let success = match result {
            Ok(_) => true,
            Err(error) => {
                log::warn!("Cannot register property '{}': {}", custom, error);
                false
            }
        };
        registered.insert(custom, success);
        success
    }

    /// Records the animation now driving a property: returns the previous one if still going.
    pub fn replace_animation(
        &self,
        target: &Arc<dyn Target>,
        name: &str,
        animation: Arc<dyn Playback>,
    ) -> Option<Arc<dyn Playback>> {
        let name = resolve_alias(name);
        self.registry
            .lock()
            .replace_animation(target, name, animation)
    }

    /// Returns the animation currently driving a property, if any.
    pub fn get_animation(&self, target: &Arc<dyn Target>, name: &str) -> Option<Arc<dyn Playback>> {
        self.registry
            .lock()
            .get_animation(target, resolve_alias(name))
    }

    /// Forgets everything known about a target.
    pub fn forget(&self, target: &Arc<dyn Target>) {
        self.registry.lock().forget(target);
    }

    /// Returns the number of targets currently known.
    pub fn get_target_count(&self) -> usize {
        self.registry.lock().len()
    }
}
