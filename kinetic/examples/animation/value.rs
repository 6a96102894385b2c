use kinetic::animations::{Easing, TimingConfig};
use kinetic::pause;
use kinetic::utils::Value;
use kinetic::Animator;

#[kinetic::runtime]
async fn main() {
    let animator = Animator::headless();

    // Counts from 0 to 100 in 2sec.
    let group = animator
        .animate_value(
            [0, 100],
            |value: Value| println!("Value: {:.1}", value.as_float()),
            TimingConfig::default()
                .set_duration(2000.0)
                .set_easing(Easing::from("steps(10, end)")),
        )
        .unwrap();

    pause!(500);
    group.pause();
    println!("Paused at {}s", group.get_current_time());

    pause!(500);
    group.play().unwrap();
    group.set_playback_rate(2.0);

    let _ = group.finished().await;
    println!("Done!");
}
