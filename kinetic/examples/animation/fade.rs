use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use kinetic::animations::{Easing, TimingConfig};
use kinetic::errors::Error;
use kinetic::host::Target;
use kinetic::utils::Value;
use kinetic::Animator;

/// A target printing every property it is given.
#[derive(Default)]
struct Console {
    styles: RwLock<HashMap<String, Value>>,
}

impl Target for Console {
    fn get_style(&self, property: &str) -> Result<Option<Value>, Error> {
        Ok(self.styles.read().get(property).cloned())
    }

    fn set_style(&self, property: &str, value: &Value) -> Result<(), Error> {
        println!("{}: {}", property, value);
        self.styles.write().insert(property.to_string(), value.clone());
        Ok(())
    }
}

#[kinetic::runtime]
async fn main() {
    let animator = Animator::headless();
    let console = Arc::new(Console::default());

    // Fade in for 1sec.
    let group = animator
        .animate(
            console.clone(),
            ("opacity", [0, 1]),
            TimingConfig::default()
                .set_duration(1000.0)
                .set_easing(Easing::EaseInOut),
        )
        .unwrap();
    let _ = group.finished().await;

    // Fade out from wherever it is.
    let group = animator
        .animate(
            console.clone(),
            ("opacity", 0),
            TimingConfig::default().set_duration(500.0),
        )
        .unwrap();
    match group.finished().await {
        Ok(values) => println!("Done: {:?}", values),
        Err(rejection) => println!("{}", rejection),
    }
}
