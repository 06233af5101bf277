//! Stable grouping and sorting for delivery reports.

use std::cmp::Ordering;

use hashbrown::HashMap;

use crate::{parcel::DeliveryRecord, types::Status};

/// Sortable delivery record fields.
///
/// Field access goes through these typed accessors; `Status` compares by its
/// canonical report rank rather than by label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Parcel id.
    Id,
    /// Sender name.
    Sender,
    /// Receiver name.
    Receiver,
    /// Destination location name.
    Destination,
    /// Lifecycle status, ranked `Pending < Dispatched < OutForDelivery < Delivered`.
    Status,
}

impl SortKey {
    fn compare(self, a: &DeliveryRecord, b: &DeliveryRecord) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Sender => a.sender.cmp(&b.sender),
            Self::Receiver => a.receiver.cmp(&b.receiver),
            Self::Destination => a.destination.cmp(&b.destination),
            Self::Status => a.status.rank().cmp(&b.status.rank()),
        }
    }

    fn field_text(self, record: &DeliveryRecord) -> String {
        match self {
            Self::Id => record.id.clone(),
            Self::Sender => record.sender.clone(),
            Self::Receiver => record.receiver.clone(),
            Self::Destination => record.destination.clone(),
            Self::Status => record.status.label().to_string(),
        }
    }
}

/// Stable ascending sort by `key`.
///
/// Recursive three-way partition around the first element: records comparing
/// less and greater recurse, equal records keep their relative order in the
/// middle. Worst case O(n²), accepted at report scale.
pub fn sort_by_key(records: &[DeliveryRecord], key: SortKey) -> Vec<DeliveryRecord> {
    if records.len() <= 1 {
        return records.to_vec();
    }

    let pivot = &records[0];
    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();

    for record in records {
        match key.compare(record, pivot) {
            Ordering::Less => less.push(record.clone()),
            Ordering::Equal => equal.push(record.clone()),
            Ordering::Greater => greater.push(record.clone()),
        }
    }

    let mut sorted = sort_by_key(&less, key);
    sorted.extend(equal);
    sorted.extend(sort_by_key(&greater, key));
    sorted
}

/// Groups by the primary field's text value, orders groups by status
/// priority, then sorts each group by `secondary`.
///
/// Groups appear in canonical status rank order; labels outside the four
/// statuses sort last, keeping their first-seen order among themselves.
pub fn group_then_sort(
    records: &[DeliveryRecord],
    primary: SortKey,
    secondary: SortKey,
) -> Vec<DeliveryRecord> {
    let mut group_keys: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<DeliveryRecord>> = HashMap::new();

    for record in records {
        let key = primary.field_text(record);
        if !groups.contains_key(&key) {
            group_keys.push(key.clone());
        }
        groups.entry(key).or_default().push(record.clone());
    }

    group_keys.sort_by_key(|key| status_priority(key));

    let mut sorted = Vec::with_capacity(records.len());
    for key in &group_keys {
        sorted.extend(sort_by_key(&groups[key], secondary));
    }
    sorted
}

fn status_priority(label: &str) -> u8 {
    [
        Status::Pending,
        Status::Dispatched,
        Status::OutForDelivery,
        Status::Delivered,
    ]
    .iter()
    .find(|status| status.label() == label)
    .map(|status| status.rank())
    .unwrap_or(u8::MAX)
}
