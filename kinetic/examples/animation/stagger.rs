use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use kinetic::animations::{stagger, Direction, Keyframes, TimingConfig};
use kinetic::errors::Error;
use kinetic::host::Target;
use kinetic::utils::Value;
use kinetic::Animator;

/// A named target printing every property it is given.
struct Console {
    name: String,
    styles: RwLock<HashMap<String, Value>>,
}

impl Console {
    fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            styles: Default::default(),
        })
    }
}

impl Target for Console {
    fn get_style(&self, property: &str) -> Result<Option<Value>, Error> {
        Ok(self.styles.read().get(property).cloned())
    }

    fn set_style(&self, property: &str, value: &Value) -> Result<(), Error> {
        println!("[{}] {}: {}", self.name, property, value);
        self.styles.write().insert(property.to_string(), value.clone());
        Ok(())
    }
}

#[kinetic::runtime]
async fn main() {
    let animator = Animator::headless();
    let targets = vec![Console::new("A"), Console::new("B"), Console::new("C")];

    // Each target moves right and grows, 150ms after the previous one, then comes back.
    let keyframes = Keyframes::default()
        .with_property("x", [0, 100])
        .with_property("scale", [1.0, 1.5]);
    let group = animator
        .animate(
            targets,
            keyframes,
            TimingConfig::default()
                .set_duration(600.0)
                .set_delay(stagger(150.0))
                .set_repeat(1)
                .set_direction(Direction::Alternate),
        )
        .unwrap();

    println!("Animating {} properties for {}s", group.len(), group.get_duration());
    let _ = group.finished().await;
}
