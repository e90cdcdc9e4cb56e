//! In-memory collaborators and database helpers for tests.
pub mod fakes;
pub mod prepare_env;

pub use fakes::{MemorySnapshotStore, RecordingNotifier, StaticOrderSource};
