mod order_watch_world;
mod setups;
mod steps;

pub use order_watch_world::OrderWatchWorld;
