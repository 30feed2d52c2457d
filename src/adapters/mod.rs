// Adapters layer: concrete implementations of the domain ports.

pub mod memory;
pub mod snapshot;

pub use memory::{
    InMemoryMenuRepository, InMemoryPaymentRepository, InMemoryRestaurantRepository,
    InMemoryStore,
};
pub use snapshot::{Snapshot, SnapshotStore};
