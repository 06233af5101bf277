use std::collections::VecDeque;

use crate::{
    core::store::DeliveryStore,
    types::{ParcelId, Status},
};

#[derive(Debug, Default)]
pub struct DispatchQueue {
    entries: VecDeque<ParcelId>,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, id: ParcelId) {
        self.entries.push_back(id);
    }

    // Entries are never popped or reordered; dispatch flips the first
    // Pending record found front-to-back.
    pub fn dispatch_next_pending(&self, store: &mut DeliveryStore) -> Option<ParcelId> {
        for id in &self.entries {
            if let Some(record) = store.get_mut(id) {
                if record.status == Status::Pending {
                    record.status = Status::Dispatched;
                    return Some(id.clone());
                }
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParcelId> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
