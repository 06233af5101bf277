//! Delivery domain records: drafts, live records, and completion summaries.

use serde::{Deserialize, Serialize};

use crate::types::{Minutes, ParcelId, Status};

/// Registration payload used to create a new [`DeliveryRecord`].
///
/// The status is not part of the draft; the lifecycle assigns it based on the
/// single-active-shipment rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryDraft {
    /// Caller-assigned parcel id.
    pub id: ParcelId,
    /// Sender name.
    pub sender: String,
    /// Receiver name.
    pub receiver: String,
    /// Destination location name; must match a route-graph node to be routable.
    pub destination: String,
}

/// Authoritative delivery record.
///
/// `status` is the only field that changes after registration; records are
/// never removed from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Caller-assigned parcel id.
    pub id: ParcelId,
    /// Sender name.
    pub sender: String,
    /// Receiver name.
    pub receiver: String,
    /// Destination location name.
    pub destination: String,
    /// Current lifecycle status.
    pub status: Status,
}

/// Append-only summary written when an active shipment reaches `Delivered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Parcel id of the completed delivery.
    pub id: ParcelId,
    /// Sender name.
    pub sender: String,
    /// Receiver name.
    pub receiver: String,
    /// Route origin, always the graph's depot.
    pub origin: String,
    /// Destination location name.
    pub destination: String,
    /// Location names from depot to destination; empty when unreachable.
    pub route: Vec<String>,
    /// Summed edge minutes along `route`; 0 when unreachable.
    pub total_time: Minutes,
    /// Always [`Status::Delivered`].
    pub status: Status,
}

impl CompletionRecord {
    /// Route column as rendered in the summary table, `"N/A"` when unreachable.
    pub fn route_display(&self) -> String {
        if self.route.is_empty() {
            "N/A".to_string()
        } else {
            self.route.join(" -> ")
        }
    }
}
