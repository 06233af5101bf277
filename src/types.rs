//! Shared primitive types and the delivery status enum.

use serde::{Deserialize, Serialize};

/// Caller-assigned parcel identifier, unique across the store's lifetime.
pub type ParcelId = String;
/// Travel time in minutes.
pub type Minutes = u32;

/// Lifecycle state of a delivery record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Registered but waiting behind an active shipment.
    Pending,
    /// Handed off and counting as the active shipment.
    Dispatched,
    /// On the road, still the active shipment.
    OutForDelivery,
    /// Arrived at the destination.
    Delivered,
}

impl Status {
    /// Maps a menu-style code in `1..=4` to a status.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Pending),
            2 => Some(Self::Dispatched),
            3 => Some(Self::OutForDelivery),
            4 => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Inverse of [`Status::from_code`].
    pub fn code(self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::Dispatched => 2,
            Self::OutForDelivery => 3,
            Self::Delivered => 4,
        }
    }

    /// Canonical report rank: `Pending < Dispatched < OutForDelivery < Delivered`.
    pub fn rank(self) -> u8 {
        self.code() - 1
    }

    /// True for the states that count as an active shipment.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Dispatched | Self::OutForDelivery)
    }

    /// Human-readable label as printed in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Dispatched => "Dispatched",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        }
    }
}
