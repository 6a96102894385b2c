use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::host::{Host, NativeAnimation, NativeRequest};
use crate::utils::Value;

/// Lists the host capabilities the engine relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Animations can be run natively.
    NativeAnimation,
    /// Typed custom properties can be registered.
    PropertyRegistration,
    /// A native animation accepts a single keyframe (implicit start value).
    PartialKeyframes,
    /// Native animations accept `linear(...)` easings.
    LinearEasing,
    /// Native animations report their completion.
    CompletionNotification,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let capability = match self {
            Capability::NativeAnimation => "native animation",
            Capability::PropertyRegistration => "property registration",
            Capability::PartialKeyframes => "partial keyframes",
            Capability::LinearEasing => "linear easing",
            Capability::CompletionNotification => "completion notification",
        };
        write!(f, "{}", capability)
    }
}

/// Lazily probes the host capabilities: each one is probed once and memoized.
pub struct Capabilities {
    host: Arc<dyn Host>,
    cache: RwLock<HashMap<Capability, bool>>,
}

impl Capabilities {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            cache: Default::default(),
        }
    }

    pub fn get_host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    /// Indicates if the host supports the given capability.
    pub fn supports(&self, capability: Capability) -> bool {
        if let Some(supported) = self.cache.read().get(&capability) {
            return *supported;
        }
        let supported = self.probe(capability);
        log::debug!("Capability probe: {} = {}", capability, supported);
        *self.cache.write().entry(capability).or_insert(supported)
    }

    fn probe(&self, capability: Capability) -> bool {
        match capability {
            Capability::NativeAnimation => self.host.supports_native_animation(),
            Capability::PropertyRegistration => self.host.supports_property_registration(),
            Capability::PartialKeyframes => {
                let request = NativeRequest::new("opacity", vec![Value::from(1)]);
                self.probe_native(request, |_| true)
            }
            Capability::LinearEasing => {
                let request =
                    NativeRequest::new("opacity", vec![Value::from(0)]).set_easing("linear(0, 1)");
                self.probe_native(request, |_| true)
            }
            Capability::CompletionNotification => {
                let request = NativeRequest::new("opacity", vec![Value::from(0), Value::from(1)])
                    .set_duration(0.001);
                self.probe_native(request, |animation| {
                    animation.on_complete(Box::new(|_| {}))
                })
            }
        }
    }

    /// Creates a throwaway native animation, checks it and cancels it right away.
    fn probe_native<F>(&self, request: NativeRequest, check: F) -> bool
    where
        F: FnOnce(&dyn NativeAnimation) -> bool,
    {
        if !self.supports(Capability::NativeAnimation) {
            return false;
        }
        let target = match self.host.create_probe_target() {
            None => return false,
            Some(target) => target,
        };
        match self.host.animate_native(&target, request) {
            Ok(animation) => {
                let supported = check(animation.as_ref());
                animation.cancel();
                supported
            }
            Err(error) => {
                log::debug!("Capability probe failed: {}", error);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use crate::mocks::MockHost;

    #[test]
    fn test_headless_capabilities() {
        let capabilities = Capabilities::new(Arc::new(HeadlessHost));
        assert!(!capabilities.supports(Capability::NativeAnimation));
        assert!(!capabilities.supports(Capability::PropertyRegistration));
        assert!(!capabilities.supports(Capability::PartialKeyframes));
        assert!(!capabilities.supports(Capability::LinearEasing));
        assert!(!capabilities.supports(Capability::CompletionNotification));
    }

    #[test]
    fn test_native_capabilities() {
        let host = Arc::new(MockHost::native());
        let capabilities = Capabilities::new(host.clone());
        assert!(capabilities.supports(Capability::NativeAnimation));
        assert!(capabilities.supports(Capability::PropertyRegistration));
        assert!(capabilities.supports(Capability::PartialKeyframes));
        assert!(capabilities.supports(Capability::LinearEasing));
        assert!(capabilities.supports(Capability::CompletionNotification));
        // Three probe animations were created, and all cancelled.
        assert_eq!(host.get_native_animations().len(), 3);
        assert!(host
            .get_native_animations()
            .iter()
            .all(|animation| animation.is_cancelled()));
    }

    #[test]
    fn test_probe_failures_are_unsupported() {
        let host = Arc::new(
            MockHost::native()
                .set_partial_keyframes(false)
                .set_linear_easing(false)
                .set_completion(false),
        );
        let capabilities = Capabilities::new(host);
        assert!(capabilities.supports(Capability::NativeAnimation));
        assert!(!capabilities.supports(Capability::PartialKeyframes));
        assert!(!capabilities.supports(Capability::LinearEasing));
        assert!(!capabilities.supports(Capability::CompletionNotification));
    }

    #[test]
    fn test_capabilities_are_memoized() {
        let host = Arc::new(MockHost::native());
        let capabilities = Capabilities::new(host.clone());
        assert!(capabilities.supports(Capability::PartialKeyframes));
        assert!(capabilities.supports(Capability::PartialKeyframes));
        assert!(capabilities.supports(Capability::PartialKeyframes));
        assert_eq!(host.get_native_animations().len(), 1);
    }
}
