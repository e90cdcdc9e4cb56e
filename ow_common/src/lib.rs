mod helpers;
mod secret;

pub use helpers::{parse_boolean_flag, parse_env_flag};
pub use secret::Secret;
