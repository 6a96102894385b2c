use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::animations::{
    Animation, AnimationGroup, ApplyFn, EasingDefinition, KeyframeSet, Keyframes, NativePlayback,
    PlayState, Playback, TimingConfig,
};
use crate::errors::*;
use crate::host::{
    Capabilities, Capability, HeadlessHost, Host, NativeEasing, NativeRequest, Target, Targets,
};
use crate::style::{definition, is_custom, resolve_alias, Style};
use crate::utils::{FrameScheduler, Scheduler, Value};

/// The animation engine: animates visual properties of host targets.
///
/// Each animated property is either delegated to the host (when it can run it natively) or driven
/// frame by frame by the engine scheduler.
///
/// Host capabilities are probed once per [`Capabilities`]: animators built with
/// [`Animator::with_capabilities`] share them, so a host is probed once for the whole program.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use kinetic::Animator;
/// use kinetic::animations::TimingConfig;
/// use kinetic::host::HeadlessHost;
/// use kinetic::utils::{Value, VirtualClock};
///
/// let clock = Arc::new(VirtualClock::new(10.0));
/// let animator = Animator::new(Arc::new(HeadlessHost), clock.clone());
///
/// let group = animator
///     .animate_value(
///         [0, 100],
///         |value: Value| println!("Value: {}", value),
///         TimingConfig::default().set_duration(200.0),
///     )
///     .unwrap();
///
/// clock.advance(200.0);
/// assert_eq!(group.get_current_time(), 0.2);
/// ```
pub struct Animator {
    host: Arc<dyn Host>,
    scheduler: Arc<dyn Scheduler>,
    capabilities: Arc<Capabilities>,
    style: Style,
}

impl Animator {
    pub fn new(host: Arc<dyn Host>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_capabilities(Arc::new(Capabilities::new(host)), scheduler)
    }

    /// Creates an animator reusing already probed capabilities (and their host).
    pub fn with_capabilities(
        capabilities: Arc<Capabilities>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let host = capabilities.get_host().clone();
        let style = Style::new(host.clone(), capabilities.clone());
        Self {
            host,
            scheduler,
            capabilities,
            style,
        }
    }

    /// An animator without platform capabilities, running frames on the kinetic runtime (60fps).
    pub fn headless() -> Self {
        Self::new(Arc::new(HeadlessHost), Arc::new(FrameScheduler::default()))
    }

    pub fn get_host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    pub fn get_scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.scheduler
    }

    pub fn get_capabilities(&self) -> &Arc<Capabilities> {
        &self.capabilities
    }

    pub fn get_style(&self) -> &Style {
        &self.style
    }

    /// Animates the properties of one or many targets.
    ///
    /// One animation is created per target and property, all of them controlled by the returned
    /// group. A per-target delay (see [`stagger`](crate::animations::stagger)) is resolved for each
    /// target index.
    ///
    /// # Errors
    /// * `NoTarget`: `targets` is empty.
    /// * `NoKeyframes`: `keyframes` is empty.
    /// * `EmptyKeyframes`: a property has no keyframe.
    /// * `UnresolvableProperty`: the current value of a property cannot be read.
    pub fn animate<T: Into<Targets>, K: Into<Keyframes>>(
        &self,
        targets: T,
        keyframes: K,
        options: TimingConfig,
    ) -> Result<AnimationGroup, Error> {
        let targets = targets.into();
        let keyframes = keyframes.into();
        if targets.is_empty() {
            return Err(NoTarget.into());
        }
        if keyframes.is_empty() {
            return Err(NoKeyframes.into());
        }

        let total = targets.len();
        let mut animations = Vec::with_capacity(total * keyframes.len());
        for (index, target) in targets.get().iter().enumerate() {
            for (property, values, overrides) in keyframes.iter() {
                let property_options = match overrides {
                    None => options.clone(),
                    Some(overrides) => overrides.apply(options.clone()),
                };
                let delay = property_options.get_delay().resolve(index, total);
                let property_options = property_options.set_delay(delay);
                animations.push(self.animate_style(
                    target,
                    property,
                    values.clone(),
                    property_options,
                )?);
            }
        }

        Ok(AnimationGroup::new(animations, options.get_duration()))
    }

    /// Animates a value not bound to any target: `on_update` is called with each computed value.
    ///
    /// Value animations are always driven frame by frame.
    ///
    /// # Errors
    /// * `NoKeyframes`: `keyframes` is empty.
    /// * `NonNumericKeyframe`: a keyframe has no numeric part.
    pub fn animate_value<K, F>(
        &self,
        keyframes: K,
        on_update: F,
        options: TimingConfig,
    ) -> Result<AnimationGroup, Error>
    where
        K: Into<KeyframeSet>,
        F: Fn(Value) + Send + Sync + 'static,
    {
        let mut keyframes = keyframes.into();
        if keyframes.is_empty() {
            return Err(NoKeyframes.into());
        }
        keyframes.fill_nulls(|| Value::from(0));
        if let Some(value) = keyframes.get_values().iter().find(|value| !value.is_numeric()) {
            return Err(NonNumericKeyframe {
                value: value.to_string(),
            }
            .into());
        }

        let delay = options.get_delay().resolve(0, 1);
        let options = options.set_delay(delay);
        let animation = Animation::new(
            move |value: &Value| {
                on_update(value.clone());
                Ok(())
            },
            keyframes,
            &options,
            self.scheduler.clone(),
        )?;
        Ok(AnimationGroup::new(
            vec![Arc::new(animation)],
            options.get_duration(),
        ))
    }

    /// Creates the animation of a single target property.
    fn animate_style(
        &self,
        target: &Arc<dyn Target>,
        property: &str,
        mut keyframes: KeyframeSet,
        mut options: TimingConfig,
    ) -> Result<Arc<dyn Playback>, Error> {
        let name = resolve_alias(property).to_string();
        if keyframes.is_empty() {
            return Err(EmptyKeyframes { property: name }.into());
        }
        let definition = definition(&name);

        // The previous animation of the property gives way (native ones commit their styles).
        if let Some(previous) = self.style.get_animation(target, &name) {
            if previous.get_play_state() != PlayState::Finished {
                log::debug!("Stop previous animation of '{}'", name);
                previous.stop();
            }
        }

        let current = self
            .style
            .get(target, &name)
            .map_err(|_| UnresolvableProperty {
                property: name.clone(),
            })?
            .unwrap_or(Value::from(0));
        self.style.compose(target, &name)?;
        keyframes.fill_nulls(|| current.clone());

        // Unitless numbers get the unit of the last keyframe, or the property default unit.
        let unit = keyframes
            .get_values()
            .last()
            .and_then(|value| value.unit().map(String::from))
            .or_else(|| {
                definition
                    .as_ref()
                    .filter(|definition| !definition.unit.is_empty())
                    .map(|definition| definition.unit.to_string())
            });

        // Generators are resolved once, here.
        if let EasingDefinition::Generator(generator) = options.get_easing().clone() {
            let generated = generator.create_animation(keyframes.get_values());
            if let Some(values) = generated.keyframes {
                keyframes.set_values(values);
            }
            if let Some(duration) = generated.duration {
                options = options.set_duration(duration);
            }
            options = options.set_easing(generated.easing.unwrap_or_default());
        }

        if self.can_animate_natively(&name, &options) {
            match self.animate_native(target, &name, &keyframes, &options, &current, &unit) {
                Ok(playback) => {
                    log::debug!("Animate '{}' natively", name);
                    let playback: Arc<dyn Playback> = Arc::new(playback);
                    self.style
                        .replace_animation(target, &name, playback.clone());
                    return Ok(playback);
                }
                Err(error) => log::warn!("Native animation of '{}' failed: {}", name, error),
            }
        }

        log::debug!("Animate '{}' frame by frame", name);
        if keyframes.get_values().len() == 1 {
            keyframes.prepend(current);
        }
        let apply = write_to(target, &name, unit);
        let animation = Animation::new(apply, keyframes, &options, self.scheduler.clone())?;
        let playback: Arc<dyn Playback> = Arc::new(animation);
        self.style
            .replace_animation(target, &name, playback.clone());
        Ok(playback)
    }

    /// Indicates if a property animation can be delegated to the host.
    fn can_animate_natively(&self, name: &str, options: &TimingConfig) -> bool {
        if !self.capabilities.supports(Capability::NativeAnimation) {
            return false;
        }
        let composable = definition(name).is_some();
        let registered = match composable {
            true => self.style.register(name),
            false => {
                !is_custom(name) || self.capabilities.supports(Capability::PropertyRegistration)
            }
        };
        if !registered {
            return false;
        }
        if composable
            && options.get_easing().has_function()
            && !self.capabilities.supports(Capability::LinearEasing)
        {
            return false;
        }
        self.capabilities
            .supports(Capability::CompletionNotification)
    }

    /// Delegates a property animation to the host.
    fn animate_native(
        &self,
        target: &Arc<dyn Target>,
        name: &str,
        keyframes: &KeyframeSet,
        options: &TimingConfig,
        current: &Value,
        unit: &Option<String>,
    ) -> Result<NativePlayback, Error> {
        let mut values: Vec<Value> = keyframes
            .get_values()
            .iter()
            .map(|value| with_unit(value, unit))
            .collect();
        let mut offsets = keyframes.get_offsets().cloned();
        if values.len() == 1 && !self.capabilities.supports(Capability::PartialKeyframes) {
            values.insert(0, with_unit(current, unit));
            offsets = None;
        }

        let duration = options.get_duration();
        let linear = self.capabilities.supports(Capability::LinearEasing);
        let easing = match options.get_easing() {
            EasingDefinition::Single(easing) => {
                NativeEasing::Single(easing.to_native(duration, linear))
            }
            EasingDefinition::PerSegment(easings) => NativeEasing::PerSegment(
                easings
                    .iter()
                    .map(|easing| easing.to_native(duration, linear))
                    .collect(),
            ),
            EasingDefinition::Generator(_) => NativeEasing::Single(String::from("linear")),
        };

        // Same end value as the frame by frame path: the first keyframe if the last iteration
        // runs backward (the implicit start value for a single keyframe).
        let final_value = match options.get_direction().ends_backward(options.get_repeat()) {
            true if values.len() == 1 => with_unit(current, unit),
            true => values.first().cloned().unwrap_or_default(),
            false => values.last().cloned().unwrap_or_default(),
        };
        let request = NativeRequest {
            property: Style::get_storage_name(name),
            keyframes: values,
            offsets,
            delay: options.get_delay().resolve(0, 1),
            duration,
            end_delay: options.get_end_delay(),
            easing,
            direction: options.get_direction(),
            iterations: options.get_repeat() + 1,
            fill: String::from("both"),
        };
        let animation = self.host.animate_native(target, request)?;

        let on_finish = match options.is_persist() {
            true => None,
            false => Some(write_to(target, name, None)),
        };
        let playback = NativePlayback::new(animation, duration, final_value, on_finish)?;
        if !options.is_autoplay() {
            playback.hold();
        }
        Ok(playback)
    }
}

impl Debug for Animator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("targets", &self.style.get_target_count())
            .finish()
    }
}

/// Gives a unitless number the given unit.
fn with_unit(value: &Value, unit: &Option<String>) -> Value {
    match (value, unit) {
        (Value::Number(number), Some(unit)) => Value::with_unit(*number, unit),
        _ => value.clone(),
    }
}

/// Builds the callback writing values to a target property.
///
/// Only a weak reference to the target is kept: writing to a dropped target fails.
fn write_to(target: &Arc<dyn Target>, name: &str, unit: Option<String>) -> ApplyFn {
    let target = Arc::downgrade(target);
    let property = Style::get_storage_name(name);
    Box::new(move |value: &Value| match target.upgrade() {
        None => Err(ApplicationError {
            property: property.clone(),
            info: String::from("target dropped"),
        }),
        Some(target) => target.set_style(&property, &with_unit(value, &unit)),
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use parking_lot::Mutex;

    use super::*;
    use crate::animations::{stagger, Easing};
    use crate::errors::Cancelled;
    use crate::host::NativeAnimation;
    use crate::mocks::{MockHost, MockTarget};
    use crate::utils::VirtualClock;

    fn headless() -> (Animator, Arc<VirtualClock>) {
        let clock = Arc::new(VirtualClock::new(10.0));
        (Animator::new(Arc::new(HeadlessHost), clock.clone()), clock)
    }

    fn native(host: MockHost) -> (Animator, Arc<MockHost>, Arc<VirtualClock>) {
        let clock = Arc::new(VirtualClock::new(10.0));
        let host = Arc::new(host);
        (Animator::new(host.clone(), clock.clone()), host, clock)
    }

    fn linear(duration: f64) -> TimingConfig {
        TimingConfig::default()
            .set_duration(duration)
            .set_easing(Easing::Linear)
    }

    #[test]
    fn test_animate_frame_by_frame() {
        let (animator, clock) = headless();
        let target = Arc::new(MockTarget::default());
        let group = animator
            .animate(target.clone(), ("opacity", [0, 1]), linear(100.0))
            .unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group.get_duration(), 0.1);
        assert!(group.get_animations()[0].as_native().is_none());

        clock.advance(50.0);
        assert_eq!(target.get("opacity"), Some(Value::from(0.5)));
        clock.advance(50.0);
        assert_eq!(target.get("opacity"), Some(Value::from(1)));
        assert_eq!(block_on(group.finished()), Ok(vec![Value::from(1)]));
    }

    #[test]
    fn test_single_keyframe_starts_from_current_value() {
        let (animator, clock) = headless();
        let target = Arc::new(MockTarget::default().with_style("opacity", 0.5));
        animator
            .animate(target.clone(), ("opacity", 1), linear(100.0))
            .unwrap();
        clock.advance(50.0);
        assert_eq!(target.get("opacity"), Some(Value::from(0.75)));
    }

    #[test]
    fn test_wildcard_keyframe() {
        let (animator, clock) = headless();
        let target = Arc::new(MockTarget::default().with_style("width", "50px"));
        animator
            .animate(
                target.clone(),
                ("width", [Value::Null, Value::from("100px")]),
                linear(100.0),
            )
            .unwrap();
        clock.advance(50.0);
        assert_eq!(target.get("width"), Some(Value::from("75px")));
    }

    #[test]
    fn test_missing_value_starts_from_zero() {
        let (animator, clock) = headless();
        let target = Arc::new(MockTarget::default());
        animator
            .animate(target.clone(), ("height", 100), linear(100.0))
            .unwrap();
        clock.advance(50.0);
        assert_eq!(target.get("height"), Some(Value::from(50)));
    }

    #[test]
    fn test_composable_transforms() {
        let (animator, clock) = headless();
        let target = Arc::new(MockTarget::default());
        let keyframes = Keyframes::default()
            .with_property("x", 100)
            .with_property("scale", [1, 2]);
        animator
            .animate(target.clone(), keyframes, linear(100.0))
            .unwrap();

        assert_eq!(
            target.get("transform"),
            Some(Value::from(
                "translateX(var(--motion-translateX)) scale(var(--motion-scale))"
            ))
        );
        clock.advance(50.0);
        assert_eq!(target.get("--motion-translateX"), Some(Value::from("50px")));
        assert_eq!(target.get("--motion-scale"), Some(Value::from(1.5)));
        assert_eq!(target.get("x"), None);
    }

    #[test]
    fn test_configuration_errors() {
        let (animator, _) = headless();
        let target = Arc::new(MockTarget::default().set_unresolvable("foo"));

        let result = animator.animate(Vec::<Arc<MockTarget>>::new(), ("opacity", 1), linear(1.0));
        assert_eq!(
            result.err().map(|error| error.to_string()),
            Some(String::from("Configuration error: No valid target provided."))
        );

        let result = animator.animate(target.clone(), Keyframes::default(), linear(1.0));
        assert_eq!(
            result.err().map(|error| error.to_string()),
            Some(String::from("Configuration error: No keyframes defined."))
        );

        let result = animator.animate(
            target.clone(),
            ("opacity", KeyframeSet::new(Vec::<Value>::new())),
            linear(1.0),
        );
        assert_eq!(
            result.err().map(|error| error.to_string()),
            Some(String::from(
                "Configuration error: Keyframes for 'opacity' are empty."
            ))
        );

        let result = animator.animate(target.clone(), ("foo", 1), linear(1.0));
        assert_eq!(
            result.err().map(|error| error.to_string()),
            Some(String::from(
                "Configuration error: Property 'foo' cannot be resolved on target."
            ))
        );
    }

    #[test]
    fn test_stagger() {
        let (animator, clock) = headless();
        let targets: Vec<Arc<MockTarget>> = (0..3).map(|_| Arc::new(MockTarget::default())).collect();
        let group = animator
            .animate(
                targets.clone(),
                ("opacity", [0, 1]),
                linear(100.0).set_delay(stagger(100.0)),
            )
            .unwrap();
        assert_eq!(group.len(), 3);

        clock.advance(150.0);
        assert_eq!(targets[0].get("opacity"), Some(Value::from(1)));
        assert_eq!(targets[1].get("opacity"), Some(Value::from(0.5)));
        assert_eq!(targets[2].get("opacity"), Some(Value::from(0)));
    }

    #[test]
    fn test_property_options() {
        let (animator, clock) = headless();
        let target = Arc::new(MockTarget::default());
        let keyframes = Keyframes::default()
            .with_property("opacity", [0, 1])
            .with_property_options("width", ["0px", "100px"], |options| {
                options.set_duration(1000.0)
            });
        let group = animator
            .animate(target.clone(), keyframes, linear(100.0))
            .unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.get_duration(), 1.0);

        clock.advance(100.0);
        assert_eq!(target.get("opacity"), Some(Value::from(1)));
        assert_eq!(target.get("width"), Some(Value::from("10px")));
    }

    #[test]
    fn test_new_animation_stops_previous() {
        let (animator, clock) = headless();
        let target = Arc::new(MockTarget::default());
        let first = animator
            .animate(target.clone(), ("opacity", [0, 1]), linear(100.0))
            .unwrap();
        clock.advance(50.0);

        let second = animator
            .animate(target.clone(), ("opacity", 0), linear(100.0))
            .unwrap();
        assert_eq!(first.get_play_state(), PlayState::Idle);
        assert_eq!(block_on(first.finished()), Err(Cancelled));

        // Starts from where the first one stopped.
        clock.advance(50.0);
        assert_eq!(target.get("opacity"), Some(Value::from(0.25)));
        assert_eq!(second.get_play_state(), PlayState::Running);
    }

    #[test]
    fn test_write_errors_stop_the_animation() {
        let (animator, clock) = headless();
        let target = Arc::new(MockTarget::default().set_read_only("opacity"));
        let group = animator
            .animate(target.clone(), ("opacity", [0, 1]), linear(100.0))
            .unwrap();
        clock.step();
        assert_eq!(group.get_play_state(), PlayState::Idle);
        let rejection = block_on(group.finished()).unwrap_err();
        assert_ne!(rejection, Cancelled);
        assert_eq!(
            rejection.get_error().map(|error| error.to_string()),
            Some(String::from(
                "Application error: cannot write 'opacity' - read-only property."
            ))
        );
    }

    #[test]
    fn test_dropped_target() {
        let (animator, clock) = headless();
        let target = Arc::new(MockTarget::default());
        let group = animator
            .animate(target.clone(), ("opacity", [0, 1]), linear(100.0))
            .unwrap();
        assert_eq!(animator.get_style().get_target_count(), 1);

        drop(target);
        clock.step();
        assert_eq!(group.get_play_state(), PlayState::Idle);
        assert_eq!(animator.get_style().get_target_count(), 0);
    }

    #[test]
    fn test_animate_value() {
        let (animator, clock) = headless();
        let values = Arc::new(Mutex::new(vec![]));
        let values_clone = values.clone();
        let group = animator
            .animate_value(
                [0, 10],
                move |value| values_clone.lock().push(value),
                linear(100.0),
            )
            .unwrap();

        clock.advance(100.0);
        assert_eq!(values.lock().len(), 10);
        assert_eq!(values.lock()[4], Value::from(5));
        assert_eq!(block_on(group.finished()), Ok(vec![Value::from(10)]));

        let result = animator.animate_value(KeyframeSet::default(), |_| {}, linear(100.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_animate_value_requires_numbers() {
        let (animator, _) = headless();
        let result = animator.animate_value(["0px", "auto"], |_| {}, linear(100.0));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Configuration error: Keyframe 'auto' is not numeric."
        );

        // Units are fine.
        assert!(animator
            .animate_value(["0px", "10px"], |_| {}, linear(100.0))
            .is_ok());
    }

    #[test]
    fn test_animate_natively() {
        let (animator, host, clock) = native(MockHost::native());
        let target = Arc::new(MockTarget::default());
        let options = TimingConfig::default()
            .set_duration(500.0)
            .set_delay(100.0)
            .set_repeat(2)
            .set_direction("alternate");
        let group = animator
            .animate(target.clone(), ("opacity", [0, 1]), options)
            .unwrap();
        assert!(group.get_animations()[0].as_native().is_some());
        assert_eq!(group.get_duration(), 0.5);

        let animation = host.get_native_animations().last().cloned().unwrap();
        let request = animation.get_request();
        assert_eq!(request.property, "opacity");
        assert_eq!(request.keyframes, vec![Value::from(0), Value::from(1)]);
        assert_eq!(request.duration, 500.0);
        assert_eq!(request.delay, 100.0);
        assert_eq!(request.iterations, 3);
        assert_eq!(request.easing, NativeEasing::Single(String::from("ease")));
        assert_eq!(request.fill, "both");

        // Nothing runs frame by frame.
        assert_eq!(clock.get_pending(), 0);

        animation.complete();
        assert_eq!(target.get("opacity"), Some(Value::from(1)));
        assert!(animation.is_cancelled());
        assert_eq!(block_on(group.finished()), Ok(vec![Value::from(1)]));
    }

    #[test]
    fn test_animate_natively_persist() {
        let (animator, host, _) = native(MockHost::native());
        let target = Arc::new(MockTarget::default());
        let group = animator
            .animate(
                target.clone(),
                ("opacity", [0, 1]),
                TimingConfig::default().set_persist(true),
            )
            .unwrap();

        let animation = host.get_native_animations().last().cloned().unwrap();
        animation.complete();
        assert_eq!(target.get("opacity"), None);
        assert!(!animation.is_cancelled());
        assert!(block_on(group.finished()).is_ok());
    }

    #[test]
    fn test_animate_transform_natively() {
        let (animator, host, _) = native(MockHost::native());
        let target = Arc::new(MockTarget::default());
        animator
            .animate(target.clone(), ("x", [0, 100]), linear(300.0))
            .unwrap();

        let animation = host.get_native_animations().last().cloned().unwrap();
        let request = animation.get_request();
        assert_eq!(request.property, "--motion-translateX");
        assert_eq!(
            request.keyframes,
            vec![Value::from("0px"), Value::from("100px")]
        );
        assert_eq!(request.easing, NativeEasing::Single(String::from("linear")));
        assert_eq!(host.get_registered()[0].name, "--motion-translateX");
        assert_eq!(
            target.get("transform"),
            Some(Value::from("translateX(var(--motion-translateX))"))
        );

        animation.complete();
        assert_eq!(target.get("--motion-translateX"), Some(Value::from("100px")));
    }

    #[test]
    fn test_partial_keyframes_are_completed() {
        let (animator, host, _) = native(MockHost::native().set_partial_keyframes(false));
        let target = Arc::new(MockTarget::default().with_style("opacity", 0.2));
        animator
            .animate(target.clone(), ("opacity", 1), TimingConfig::default())
            .unwrap();

        let animation = host.get_native_animations().last().cloned().unwrap();
        assert_eq!(
            animation.get_request().keyframes,
            vec![Value::from(0.2), Value::from(1)]
        );

        let (animator, host, _) = native(MockHost::native());
        animator
            .animate(target.clone(), ("opacity", 1), TimingConfig::default())
            .unwrap();
        let animation = host.get_native_animations().last().cloned().unwrap();
        assert_eq!(animation.get_request().keyframes, vec![Value::from(1)]);
    }

    #[test]
    fn test_function_easing_natively() {
        let (animator, host, _) = native(MockHost::native());
        let target = Arc::new(MockTarget::default());
        animator
            .animate(
                target.clone(),
                ("scale", [1, 2]),
                TimingConfig::default()
                    .set_duration(30.0)
                    .set_easing(Easing::custom(|p| p * p)),
            )
            .unwrap();
        let animation = host.get_native_animations().last().cloned().unwrap();
        assert_eq!(
            animation.get_request().easing,
            NativeEasing::Single(String::from("linear(0, 1)"))
        );
    }

    #[test]
    fn test_fallback_without_linear_easing() {
        let (animator, host, clock) = native(MockHost::native().set_linear_easing(false));
        let target = Arc::new(MockTarget::default());
        let group = animator
            .animate(
                target.clone(),
                ("scale", [1, 2]),
                linear(100.0).set_easing(Easing::custom(|p| p)),
            )
            .unwrap();
        assert!(group.get_animations()[0].as_native().is_none());
        assert!(host.get_native_animations_of("--motion-scale").is_empty());

        clock.advance(50.0);
        assert_eq!(target.get("--motion-scale"), Some(Value::from(1.5)));

        // Non composable properties degrade the easing instead.
        let group = animator
            .animate(
                target.clone(),
                ("opacity", [0, 1]),
                linear(100.0).set_easing(Easing::custom(|p| p)),
            )
            .unwrap();
        assert!(group.get_animations()[0].as_native().is_some());
        let animation = host.get_native_animations().last().cloned().unwrap();
        assert_eq!(
            animation.get_request().easing,
            NativeEasing::Single(String::from("ease"))
        );
    }

    #[test]
    fn test_fallback_on_registration_failure() {
        let (animator, host, _) = native(MockHost::native().set_registration_error(true));
        let target = Arc::new(MockTarget::default());
        let group = animator
            .animate(target.clone(), ("rotate", [0, 90]), linear(100.0))
            .unwrap();
        assert!(group.get_animations()[0].as_native().is_none());
        assert!(host.get_native_animations_of("--motion-rotate").is_empty());
    }

    #[test]
    fn test_fallback_without_completion() {
        let (animator, host, clock) = native(MockHost::native().set_completion(false));
        let target = Arc::new(MockTarget::default());
        let group = animator
            .animate(target.clone(), ("opacity", [0, 1]), linear(100.0))
            .unwrap();
        assert!(group.get_animations()[0].as_native().is_none());
        // Only the probe animation was created.
        assert_eq!(host.get_native_animations().len(), 1);
        clock.advance(100.0);
        assert_eq!(target.get("opacity"), Some(Value::from(1)));
    }

    #[test]
    fn test_native_stop_commits_styles() {
        let (animator, host, _) = native(MockHost::native());
        let target = Arc::new(MockTarget::default());
        let group = animator
            .animate(target.clone(), ("opacity", [0, 1]), linear(100.0))
            .unwrap();
        group.stop();

        let animation = host.get_native_animations().last().cloned().unwrap();
        assert!(animation.is_cancelled());
        assert_eq!(target.get("opacity"), Some(Value::from(1)));
        assert_eq!(block_on(group.finished()), Err(Cancelled));
    }

    #[test]
    fn test_native_autoplay_disabled() {
        let (animator, host, _) = native(MockHost::native());
        let target = Arc::new(MockTarget::default());
        let group = animator
            .animate(
                target.clone(),
                ("opacity", [0, 1]),
                linear(100.0).set_autoplay(false),
            )
            .unwrap();
        assert_eq!(group.get_play_state(), PlayState::Idle);
        assert_eq!(
            host.get_native_animations().last().map(|a| a.get_play_state()),
            Some(PlayState::Paused)
        );

        group.play().unwrap();
        assert_eq!(group.get_play_state(), PlayState::Running);
        assert_eq!(
            host.get_native_animations().last().map(|a| a.get_play_state()),
            Some(PlayState::Running)
        );
    }

    #[test]
    fn test_native_and_frame_by_frame_end_alike() {
        let directions = [
            linear(100.0),
            linear(100.0).set_direction("reverse"),
            linear(100.0).set_direction("alternate").set_repeat(1),
            linear(100.0).set_direction("alternate-reverse").set_repeat(1),
        ];
        for options in directions {
            let (animator, clock) = headless();
            let manual = Arc::new(MockTarget::default());
            let group = animator
                .animate(manual.clone(), ("opacity", [0, 1]), options.clone())
                .unwrap();
            clock.advance(200.0);
            let manual_end = block_on(group.finished()).unwrap();

            let (animator, host, _) = native(MockHost::native());
            let delegated = Arc::new(MockTarget::default());
            let group = animator
                .animate(delegated.clone(), ("opacity", [0, 1]), options)
                .unwrap();
            host.get_native_animations_of("opacity")
                .last()
                .unwrap()
                .complete();
            let native_end = block_on(group.finished()).unwrap();

            assert_eq!(delegated.get("opacity"), manual.get("opacity"));
            assert_eq!(native_end, manual_end);
        }
    }

    #[test]
    fn test_shared_capabilities() {
        let (first, host, clock) = native(MockHost::native());
        let second = Animator::with_capabilities(first.get_capabilities().clone(), clock);
        assert!(Arc::ptr_eq(first.get_host(), second.get_host()));

        first
            .animate(
                Arc::new(MockTarget::default()),
                ("opacity", [0, 1]),
                linear(100.0),
            )
            .unwrap();
        let count = host.get_native_animations().len();

        // No more probe: only the animation itself is created.
        second
            .animate(
                Arc::new(MockTarget::default()),
                ("opacity", [0, 1]),
                linear(100.0),
            )
            .unwrap();
        assert_eq!(host.get_native_animations().len(), count + 1);
    }
}
