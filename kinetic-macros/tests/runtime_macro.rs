extern crate kinetic_macros;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use kinetic::utils::{task, tokio};

#[kinetic_macros::runtime]
async fn example_runtime_function() -> bool {
    let flag = Arc::new(AtomicBool::new(false));
    let moved_flag = flag.clone();
    task::run(async move {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        moved_flag.store(true, Ordering::SeqCst);
    })
    .unwrap();
    // Evaluated once every spawned task is done.
    flag.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[kinetic_macros::test]
    async fn example_test_function() {
        task::run(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        })
        .unwrap();
    }

    #[test]
    fn test_runtime_macro() {
        assert!(example_runtime_function());
    }
}
