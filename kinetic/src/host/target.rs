use std::sync::Arc;

use crate::errors::Error;
use crate::utils::Value;

/// Represents a renderable object of the host environment whose visual properties can be animated.
///
/// Targets are identified by reference: two `Arc`s pointing to the same target are the same target.
pub trait Target: Send + Sync {
    /// Reads a visual property: `Ok(None)` means the property exists but has no value yet.
    ///
    /// # Errors
    /// When the property cannot be resolved on this target.
    fn get_style(&self, property: &str) -> Result<Option<Value>, Error>;

    /// Writes a visual property.
    fn set_style(&self, property: &str, value: &Value) -> Result<(), Error>;
}

/// One or many targets to animate.
#[derive(Clone, Default)]
pub struct Targets(Vec<Arc<dyn Target>>);

impl Targets {
    pub fn get(&self) -> &Vec<Arc<dyn Target>> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Target + 'static> From<Arc<T>> for Targets {
    fn from(target: Arc<T>) -> Self {
        Targets(vec![target])
    }
}

impl From<Arc<dyn Target>> for Targets {
    fn from(target: Arc<dyn Target>) -> Self {
        Targets(vec![target])
    }
}

impl From<Vec<Arc<dyn Target>>> for Targets {
    fn from(targets: Vec<Arc<dyn Target>>) -> Self {
        Targets(targets)
    }
}

impl<T: Target + 'static> From<Vec<Arc<T>>> for Targets {
    fn from(targets: Vec<Arc<T>>) -> Self {
        Targets(
            targets
                .into_iter()
                .map(|target| target as Arc<dyn Target>)
                .collect(),
        )
    }
}

impl<T: Target + 'static> From<&[Arc<T>]> for Targets {
    fn from(targets: &[Arc<T>]) -> Self {
        Targets::from(targets.to_vec())
    }
}
