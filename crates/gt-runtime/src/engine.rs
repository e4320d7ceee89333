mod boundary;
mod lifecycle;
mod snapshot;
mod step;

pub use lifecycle::{TourEngine, TourSession};
pub use snapshot::SNAPSHOT_SCHEMA_V1;

#[cfg(test)]
mod lifecycle_tests;
