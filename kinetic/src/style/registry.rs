use std::collections::HashMap;
use std::sync::{Arc, Weak};

use crate::animations::{PlayState, Playback};
use crate::host::Target;

/// Identifies a target by the address it lives at.
fn identity(target: &Arc<dyn Target>) -> usize {
    Arc::as_ptr(target) as *const () as usize
}

/// What is known of a single target.
struct Entry {
    target: Weak<dyn Target>,
    /// The composable transforms in use, in insertion order.
    transforms: Vec<String>,
    /// The animation currently driving each property.
    animations: HashMap<String, Arc<dyn Playback>>,
}

impl Entry {
    fn new(target: &Arc<dyn Target>) -> Self {
        Self {
            target: Arc::downgrade(target),
            transforms: vec![],
            animations: HashMap::new(),
        }
    }
}

/// Per-target state, keyed by target identity.
///
/// Targets are only weakly referenced: the entry of a dropped target is purged on next access.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<usize, Entry>,
}

impl Registry {
    /// Returns the entry of a live target, creating it if needed.
    fn entry(&mut self, target: &Arc<dyn Target>) -> &mut Entry {
        self.purge();
        self.entries
            .entry(identity(target))
            .or_insert_with(|| Entry::new(target))
    }

    /// Removes the entries of dropped targets.
    fn purge(&mut self) {
        self.entries
            .retain(|_, entry| entry.target.strong_count() > 0);
    }

    /// Records a composable transform in use: returns `true` if it was not yet.
    pub fn add_transform(&mut self, target: &Arc<dyn Target>, name: &str) -> bool {
        let entry = self.entry(target);
        match entry.transforms.iter().any(|transform| transform == name) {
            true => false,
            false => {
                entry.transforms.push(name.to_string());
                true
            }
        }
    }

    /// Returns the composable transforms in use on a target, in insertion order.
    pub fn get_transforms(&mut self, target: &Arc<dyn Target>) -> Vec<String> {
        self.entry(target).transforms.clone()
    }

    /// Records the animation now driving a property: returns the previous one if still going.
    pub fn replace_animation(
        &mut self,
        target: &Arc<dyn Target>,
        property: &str,
        animation: Arc<dyn Playback>,
    ) -> Option<Arc<dyn Playback>> {
        self.entry(target)
            .animations
            .insert(property.to_string(), animation)
            .filter(|previous| previous.get_play_state() != PlayState::Finished)
    }

    /// Returns the animation currently driving a property, if any.
    pub fn get_animation(
        &mut self,
        target: &Arc<dyn Target>,
        property: &str,
    ) -> Option<Arc<dyn Playback>> {
        self.entry(target).animations.get(property).cloned()
    }

    /// Forgets everything known about a target.
    pub fn forget(&mut self, target: &Arc<dyn Target>) {
        self.entries.remove(&identity(target));
        self.purge();
    }

    /// Returns the number of targets known.
    pub fn len(&mut self) -> usize {
        self.purge();
        self.entries.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockTarget;

    #[test]
    fn test_transforms_keep_insertion_order() {
        let mut registry = Registry::default();
        let target: Arc<dyn Target> = Arc::new(MockTarget::default());

        assert!(registry.add_transform(&target, "scale"));
        assert!(registry.add_transform(&target, "translateX"));
        assert!(!registry.add_transform(&target, "scale"));
        assert_eq!(registry.get_transforms(&target), vec!["scale", "translateX"]);
    }

    #[test]
    fn test_targets_are_isolated() {
        let mut registry = Registry::default();
        let first: Arc<dyn Target> = Arc::new(MockTarget::default());
        let second: Arc<dyn Target> = Arc::new(MockTarget::default());

        registry.add_transform(&first, "scale");
        assert!(registry.get_transforms(&second).is_empty());
        assert_eq!(registry.len(), 2);

        // Same target, other handle.
        let clone = first.clone();
        assert!(!registry.add_transform(&clone, "scale"));
    }

    #[test]
    fn test_dropped_targets_are_purged() {
        let mut registry = Registry::default();
        let first: Arc<dyn Target> = Arc::new(MockTarget::default());
        let second: Arc<dyn Target> = Arc::new(MockTarget::default());
        registry.add_transform(&first, "scale");
        registry.add_transform(&second, "rotate");
        assert_eq!(registry.len(), 2);

        drop(first);
        assert_eq!(registry.len(), 1);

        registry.forget(&second);
        assert!(registry.is_empty());
    }
}
