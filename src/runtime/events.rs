//! Runtime event stream payloads.

use crate::types::{Minutes, ParcelId, Status};

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryEvent {
    /// A delivery was registered and enqueued.
    Registered {
        /// Registered parcel id.
        id: ParcelId,
        /// Status assigned at registration.
        status: Status,
    },
    /// A record's status was updated.
    StatusUpdated {
        /// Updated parcel id.
        id: ParcelId,
        /// Status before the update.
        old: Status,
        /// Status after the update.
        new: Status,
    },
    /// An active shipment reached `Delivered` and was logged.
    Completed {
        /// Completed parcel id.
        id: ParcelId,
        /// Travel time recorded for the computed route.
        total_time: Minutes,
    },
    /// A pending delivery was auto-dispatched after a completion.
    AutoDispatched {
        /// Dispatched parcel id.
        id: ParcelId,
    },
}
