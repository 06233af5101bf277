use hashbrown::HashMap;

use crate::{
    parcel::DeliveryRecord,
    types::{ParcelId, Status},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateId(ParcelId),
}

#[derive(Debug, Default)]
pub struct DeliveryStore {
    records: HashMap<ParcelId, DeliveryRecord>,
    order: Vec<ParcelId>,
}

impl DeliveryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: DeliveryRecord) -> Result<(), StoreError> {
        if self.records.contains_key(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        self.order.push(record.id.clone());
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn exists(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&DeliveryRecord> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut DeliveryRecord> {
        self.records.get_mut(id)
    }

    pub fn get_cloned(&self, id: &str) -> Option<DeliveryRecord> {
        self.get(id).cloned()
    }

    pub fn filter_by_status(&self, status: Status) -> Vec<&DeliveryRecord> {
        self.iter_ordered().filter(|r| r.status == status).collect()
    }

    pub fn all_except(&self, status: Status) -> Vec<&DeliveryRecord> {
        self.iter_ordered().filter(|r| r.status != status).collect()
    }

    pub fn all(&self) -> Vec<&DeliveryRecord> {
        self.iter_ordered().collect()
    }

    pub fn all_cloned(&self) -> Vec<DeliveryRecord> {
        self.iter_ordered().cloned().collect()
    }

    // Single-active-shipment scan: first match in registration order.
    pub fn first_active(&self) -> Option<&DeliveryRecord> {
        self.iter_ordered().find(|r| r.status.is_active())
    }

    pub fn ordered_ids(&self) -> &[ParcelId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn iter_ordered(&self) -> impl Iterator<Item = &DeliveryRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}
