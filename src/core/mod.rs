//! In-memory delivery store and dispatch queue.

/// FIFO dispatch queue over parcel ids.
pub mod queue;
/// Authoritative delivery record store.
pub mod store;
