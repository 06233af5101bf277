//! Orchestrator coordinating the store, dispatch queue, and route graph.

use crate::{
    core::{
        queue::DispatchQueue,
        store::{DeliveryStore, StoreError},
    },
    parcel::{CompletionRecord, DeliveryDraft, DeliveryRecord},
    route::RouteGraph,
    types::{ParcelId, Status},
};

/// Recoverable failures reported by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Registration against an id already in the store.
    DuplicateId(ParcelId),
    /// Status update against an unknown id.
    NotFound(ParcelId),
    /// Status update with a code outside `1..=4`.
    InvalidStatusCode(u8),
}

impl From<StoreError> for LifecycleError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateId(id) => Self::DuplicateId(id),
        }
    }
}

/// Outcome of a status update, including cascade side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Status before the update.
    pub old: Status,
    /// Status after the update.
    pub new: Status,
    /// True when a completion record was appended.
    pub completed: bool,
    /// Id auto-dispatched from the queue as a follow-on, if any.
    pub auto_dispatched: Option<ParcelId>,
}

/// Owns the store, queue, graph, and completion log for one process.
///
/// All mutation goes through [`DeliveryLifecycle::register`] and
/// [`DeliveryLifecycle::set_status`]; both are check-then-act sequences, so
/// concurrent callers must serialize through one owner (see the runtime
/// module's single-writer loop).
#[derive(Debug)]
pub struct DeliveryLifecycle {
    store: DeliveryStore,
    queue: DispatchQueue,
    graph: RouteGraph,
    completed: Vec<CompletionRecord>,
}

impl DeliveryLifecycle {
    /// Creates an empty lifecycle routing over `graph`.
    pub fn new(graph: RouteGraph) -> Self {
        Self {
            store: DeliveryStore::new(),
            queue: DispatchQueue::new(),
            graph,
            completed: Vec::new(),
        }
    }

    /// Convenience constructor using the reference warehouse topology.
    pub fn with_warehouse_map() -> Self {
        Self::new(RouteGraph::warehouse_map())
    }

    /// Registers a delivery and enqueues it for dispatch.
    ///
    /// The new record starts `Dispatched` when no active shipment exists,
    /// otherwise `Pending`. Returns the assigned status.
    pub fn register(&mut self, draft: DeliveryDraft) -> Result<Status, LifecycleError> {
        if self.store.exists(&draft.id) {
            return Err(LifecycleError::DuplicateId(draft.id));
        }

        let status = if self.store.first_active().is_none() {
            Status::Dispatched
        } else {
            Status::Pending
        };

        let record = DeliveryRecord {
            id: draft.id.clone(),
            sender: draft.sender,
            receiver: draft.receiver,
            destination: draft.destination,
            status,
        };
        self.store.add(record)?;
        self.queue.enqueue(draft.id);
        Ok(status)
    }

    /// Sets a record's status from a code in `1..=4`.
    ///
    /// Any status may be set from any other; there is no enforced chain.
    /// Reaching `Delivered` from an active status appends one completion
    /// record and auto-dispatches the next pending queue entry. Reaching
    /// `Delivered` straight from `Pending` records nothing.
    pub fn set_status(&mut self, id: &str, code: u8) -> Result<StatusChange, LifecycleError> {
        // Id lookup is checked before the code decodes: an unknown id wins
        // over a bad code.
        let record = self
            .store
            .get_mut(id)
            .ok_or_else(|| LifecycleError::NotFound(id.to_string()))?;
        let new = Status::from_code(code).ok_or(LifecycleError::InvalidStatusCode(code))?;

        let old = record.status;
        record.status = new;

        let completed = new == Status::Delivered && old.is_active();
        let mut auto_dispatched = None;

        if completed {
            let (sender, receiver, destination) = (
                record.sender.clone(),
                record.receiver.clone(),
                record.destination.clone(),
            );
            let route = self.graph.find_route(&destination);
            let total_time = if route.is_empty() {
                0
            } else {
                self.graph.travel_time(&route)
            };
            self.completed.push(CompletionRecord {
                id: id.to_string(),
                sender,
                receiver,
                origin: self.graph.depot().to_string(),
                destination,
                route,
                total_time,
                status: Status::Delivered,
            });
            auto_dispatched = self.queue.dispatch_next_pending(&mut self.store);
        }

        Ok(StatusChange {
            old,
            new,
            completed,
            auto_dispatched,
        })
    }

    /// Records not yet delivered, in registration order.
    pub fn active_or_pending(&self) -> Vec<&DeliveryRecord> {
        self.store.all_except(Status::Delivered)
    }

    /// Delivered records, in registration order.
    pub fn delivered(&self) -> Vec<&DeliveryRecord> {
        self.store.filter_by_status(Status::Delivered)
    }

    /// The append-only completion log.
    pub fn completions(&self) -> &[CompletionRecord] {
        &self.completed
    }

    /// Looks up a record by parcel id.
    pub fn record(&self, id: &str) -> Option<&DeliveryRecord> {
        self.store.get(id)
    }

    /// Read access to the underlying store, for reporting snapshots.
    pub fn store(&self) -> &DeliveryStore {
        &self.store
    }

    /// Read access to the dispatch queue.
    pub fn queue(&self) -> &DispatchQueue {
        &self.queue
    }

    /// The route graph in use.
    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }
}
