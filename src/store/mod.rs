pub mod snapshot;

pub use snapshot::{write_atomic, Snapshot, SnapshotStore};
