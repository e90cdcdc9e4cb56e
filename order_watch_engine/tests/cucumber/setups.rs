use cucumber::given;
use order_watch_engine::test_utils::RecordingNotifier;

use crate::cucumber::{order_watch_world::OrderWatchSystem, OrderWatchWorld};

#[given("a fresh install")]
async fn fresh_install(world: &mut OrderWatchWorld) {
    let system = OrderWatchSystem::new(RecordingNotifier::default()).await;
    world.system = Some(system);
}

#[given(expr = "a fresh install with a {int} character message limit")]
async fn fresh_install_with_limit(world: &mut OrderWatchWorld, limit: usize) {
    let system = OrderWatchSystem::new(RecordingNotifier::default().with_limit(limit)).await;
    world.system = Some(system);
}
