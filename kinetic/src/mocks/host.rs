use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::animations::PlayState;
use crate::errors::{Error, NativeError};
use crate::host::{
    CompletionCallback, Host, NativeAnimation, NativeEasing, NativeRequest, PropertyDefinition,
    Target,
};
use crate::mocks::MockTarget;

/// Mock [`Host`] for testing purposes.
///
/// The default mock supports nothing (like a headless host); [`MockHost::native`] supports
/// everything. Native animations and property registrations are recorded for inspection.
#[derive(Default)]
pub struct MockHost {
    native: bool,
    registration: bool,
    registration_error: bool,
    partial_keyframes: bool,
    linear_easing: bool,
    completion: bool,
    animations: RwLock<Vec<Arc<MockNativeAnimation>>>,
    registered: RwLock<Vec<PropertyDefinition>>,
}

impl MockHost {
    /// A mock host supporting every capability.
    pub fn native() -> Self {
        Self {
            native: true,
            registration: true,
            registration_error: false,
            partial_keyframes: true,
            linear_easing: true,
            completion: true,
            ..Default::default()
        }
    }

    pub fn set_registration(mut self, registration: bool) -> Self {
        self.registration = registration;
        self
    }

    /// Makes every property registration fail.
    pub fn set_registration_error(mut self, registration_error: bool) -> Self {
        self.registration_error = registration_error;
        self
    }

    pub fn set_partial_keyframes(mut self, partial_keyframes: bool) -> Self {
        self.partial_keyframes = partial_keyframes;
        self
    }

    pub fn set_linear_easing(mut self, linear_easing: bool) -> Self {
        self.linear_easing = linear_easing;
        self
    }

    pub fn set_completion(mut self, completion: bool) -> Self {
        self.completion = completion;
        self
    }

    /// Returns every native animation created so far (probes included).
    pub fn get_native_animations(&self) -> Vec<Arc<MockNativeAnimation>> {
        self.animations.read().clone()
    }

    /// Returns the native animations created so far for a given property.
    pub fn get_native_animations_of(&self, property: &str) -> Vec<Arc<MockNativeAnimation>> {
        self.animations
            .read()
            .iter()
            .filter(|animation| animation.get_request().property == property)
            .cloned()
            .collect()
    }

    /// Returns every property registered so far.
    pub fn get_registered(&self) -> Vec<PropertyDefinition> {
        self.registered.read().clone()
    }
}

impl Host for MockHost {
    fn supports_native_animation(&self) -> bool {
        self.native
    }

    fn supports_property_registration(&self) -> bool {
        self.registration
    }

    fn register_property(&self, definition: &PropertyDefinition) -> Result<(), Error> {
        if self.registration_error {
            return Err(NativeError {
                info: format!("cannot register '{}'", definition.name),
            });
        }
        self.registered.write().push(definition.clone());
        Ok(())
    }

    fn animate_native(
        &self,
        target: &Arc<dyn Target>,
        request: NativeRequest,
    ) -> Result<Box<dyn NativeAnimation>, Error> {
        if !self.native {
            return Err(NativeError {
                info: format!("cannot animate '{}': not supported", request.property),
            });
        }
        if !self.partial_keyframes && request.keyframes.len() < 2 {
            return Err(NativeError {
                info: String::from("partial keyframes are not supported"),
            });
        }
        let linear = match &request.easing {
            NativeEasing::Single(easing) => easing.starts_with("linear("),
            NativeEasing::PerSegment(easings) => {
                easings.iter().any(|easing| easing.starts_with("linear("))
            }
        };
        if !self.linear_easing && linear {
            return Err(NativeError {
                info: String::from("linear() easing is not supported"),
            });
        }

        let animation = Arc::new(MockNativeAnimation {
            request,
            target: Arc::downgrade(target),
            completion: self.completion,
            state: RwLock::new(PlayState::Running),
            current_time: RwLock::new(0.0),
            rate: RwLock::new(1.0),
            cancelled: AtomicBool::new(false),
            callback: Mutex::new(None),
        });
        self.animations.write().push(animation.clone());
        Ok(Box::new(animation))
    }

    fn create_probe_target(&self) -> Option<Arc<dyn Target>> {
        match self.native {
            true => Some(Arc::new(MockTarget::default())),
            false => None,
        }
    }
}

/// Mock [`NativeAnimation`]: nothing runs by itself, tests drive it with [`MockNativeAnimation::complete`].
pub struct MockNativeAnimation {
    request: NativeRequest,
    target: Weak<dyn Target>,
    completion: bool,
    state: RwLock<PlayState>,
    current_time: RwLock<f64>,
    rate: RwLock<f64>,
    cancelled: AtomicBool,
    callback: Mutex<Option<CompletionCallback>>,
}

impl MockNativeAnimation {
    pub fn get_request(&self) -> &NativeRequest {
        &self.request
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Simulates the natural end of the animation.
    pub fn complete(&self) {
        *self.state.write() = PlayState::Finished;
        *self.current_time.write() = self.request.delay
            + self.request.duration * self.request.iterations as f64
            + self.request.end_delay;
        let callback = self.callback.lock().take();
        if let Some(callback) = callback {
            callback(true);
        }
    }
}

impl NativeAnimation for Arc<MockNativeAnimation> {
    fn play(&self) -> Result<(), Error> {
        *self.state.write() = PlayState::Running;
        Ok(())
    }

    fn pause(&self) {
        *self.state.write() = PlayState::Paused;
    }

    fn finish(&self) -> Result<(), Error> {
        self.complete();
        Ok(())
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        *self.state.write() = PlayState::Idle;
        let callback = self.callback.lock().take();
        if let Some(callback) = callback {
            callback(false);
        }
    }

    fn reverse(&self) {
        let rate = *self.rate.read();
        *self.rate.write() = -rate;
    }

    fn commit_styles(&self) -> Result<(), Error> {
        match (self.target.upgrade(), self.request.keyframes.last()) {
            (Some(target), Some(value)) => target.set_style(&self.request.property, value),
            _ => Ok(()),
        }
    }

    fn get_current_time(&self) -> f64 {
        *self.current_time.read()
    }

    fn set_current_time(&self, time: f64) {
        *self.current_time.write() = time;
    }

    fn get_playback_rate(&self) -> f64 {
        *self.rate.read()
    }

    fn set_playback_rate(&self, rate: f64) {
        *self.rate.write() = rate;
    }

    fn get_play_state(&self) -> PlayState {
        *self.state.read()
    }

    fn on_complete(&self, callback: CompletionCallback) -> bool {
        if !self.completion {
            return false;
        }
        *self.callback.lock() = Some(callback);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU8;

    use super::*;
    use crate::utils::Value;

    #[test]
    fn test_mock_native_animation() {
        let host = MockHost::native();
        let target: Arc<dyn Target> = Arc::new(MockTarget::default());
        let request = NativeRequest::new("opacity", vec![Value::from(0), Value::from(1)]);
        let animation = host.animate_native(&target, request).unwrap();
        assert_eq!(animation.get_play_state(), PlayState::Running);

        let outcome = Arc::new(AtomicU8::new(0));
        let clone = outcome.clone();
        assert!(animation.on_complete(Box::new(move |done| {
            clone.store(if done { 1 } else { 2 }, Ordering::SeqCst);
        })));

        animation.pause();
        assert_eq!(animation.get_play_state(), PlayState::Paused);
        animation.reverse();
        assert_eq!(animation.get_playback_rate(), -1.0);

        host.get_native_animations()[0].complete();
        assert_eq!(outcome.load(Ordering::SeqCst), 1);
        assert_eq!(animation.get_play_state(), PlayState::Finished);

        animation.commit_styles().unwrap();
        assert_eq!(target.get_style("opacity").unwrap(), Some(Value::from(1)));
    }

    #[test]
    fn test_mock_host_rejections() {
        let host = MockHost::native()
            .set_partial_keyframes(false)
            .set_linear_easing(false)
            .set_registration_error(true);
        let target: Arc<dyn Target> = Arc::new(MockTarget::default());

        let partial = NativeRequest::new("opacity", vec![Value::from(1)]);
        assert!(host.animate_native(&target, partial).is_err());
        let linear = NativeRequest::new("opacity", vec![Value::from(0), Value::from(1)])
            .set_easing("linear(0, 1)");
        assert!(host.animate_native(&target, linear).is_err());
        assert!(host.get_native_animations().is_empty());

        let definition = PropertyDefinition {
            name: String::from("--motion-scale"),
            syntax: None,
            initial_value: None,
            inherits: false,
        };
        assert!(host.register_property(&definition).is_err());
        assert!(host.get_registered().is_empty());
    }
}
