use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    lifecycle::{DeliveryLifecycle, LifecycleError, StatusChange},
    parcel::{CompletionRecord, DeliveryDraft, DeliveryRecord},
    types::{Minutes, ParcelId, Status},
};

use super::events::DeliveryEvent;

#[derive(Debug)]
pub enum RuntimeError {
    Lifecycle(LifecycleError),
    ChannelClosed,
}

impl From<LifecycleError> for RuntimeError {
    fn from(value: LifecycleError) -> Self {
        Self::Lifecycle(value)
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub cmd_queue_bound: usize,
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cmd_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable handle to the single-writer delivery loop.
pub struct DispatchLogHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<DeliveryEvent>,
}

impl Clone for DispatchLogHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Register {
        draft: DeliveryDraft,
        resp: oneshot::Sender<Result<Status, RuntimeError>>,
    },
    SetStatus {
        id: ParcelId,
        code: u8,
        resp: oneshot::Sender<Result<StatusChange, RuntimeError>>,
    },
    Get {
        id: ParcelId,
        resp: oneshot::Sender<Option<DeliveryRecord>>,
    },
    ActiveOrPending {
        resp: oneshot::Sender<Vec<DeliveryRecord>>,
    },
    Delivered {
        resp: oneshot::Sender<Vec<DeliveryRecord>>,
    },
    Completions {
        resp: oneshot::Sender<Vec<CompletionRecord>>,
    },
    FindRoute {
        destination: String,
        resp: oneshot::Sender<(Vec<String>, Minutes)>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Spawns the single-writer loop that owns `lifecycle`.
///
/// Register and set-status are check-then-act sequences, so every mutation
/// funnels through this one task; callers interact via the returned handle.
pub fn spawn_dispatchlog(lifecycle: DeliveryLifecycle, config: RuntimeConfig) -> DispatchLogHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.cmd_queue_bound);
    let (events_tx, _) = broadcast::channel::<DeliveryEvent>(config.event_capacity);

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut lifecycle = lifecycle;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut lifecycle, &events_tx_loop) {
                break;
            }
        }
    });

    DispatchLogHandle { cmd_tx, events_tx }
}

impl DispatchLogHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<DeliveryEvent> {
        self.events_tx.subscribe()
    }

    pub async fn register(&self, draft: DeliveryDraft) -> Result<Status, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Register { draft, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    pub async fn set_status(
        &self,
        id: impl Into<ParcelId>,
        code: u8,
    ) -> Result<StatusChange, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SetStatus {
                id: id.into(),
                code,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    pub async fn get(&self, id: impl Into<ParcelId>) -> Result<Option<DeliveryRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Get {
                id: id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn active_or_pending(&self) -> Result<Vec<DeliveryRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ActiveOrPending { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn delivered(&self) -> Result<Vec<DeliveryRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Delivered { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn completions(&self) -> Result<Vec<CompletionRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Completions { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn find_route(
        &self,
        destination: impl Into<String>,
    ) -> Result<(Vec<String>, Minutes), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::FindRoute {
                destination: destination.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    lifecycle: &mut DeliveryLifecycle,
    events_tx: &broadcast::Sender<DeliveryEvent>,
) -> bool {
    match cmd {
        Command::Register { draft, resp } => {
            let id = draft.id.clone();
            let res = lifecycle.register(draft).map_err(RuntimeError::from);
            if let Ok(status) = &res {
                let _ = events_tx.send(DeliveryEvent::Registered {
                    id,
                    status: *status,
                });
            }
            let _ = resp.send(res);
        }
        Command::SetStatus { id, code, resp } => {
            let res = lifecycle.set_status(&id, code).map_err(RuntimeError::from);
            if let Ok(change) = &res {
                let _ = events_tx.send(DeliveryEvent::StatusUpdated {
                    id: id.clone(),
                    old: change.old,
                    new: change.new,
                });
                if change.completed {
                    let total_time = lifecycle
                        .completions()
                        .last()
                        .map(|c| c.total_time)
                        .unwrap_or(0);
                    let _ = events_tx.send(DeliveryEvent::Completed {
                        id: id.clone(),
                        total_time,
                    });
                }
                if let Some(next) = &change.auto_dispatched {
                    let _ = events_tx.send(DeliveryEvent::AutoDispatched { id: next.clone() });
                }
            }
            let _ = resp.send(res);
        }
        Command::Get { id, resp } => {
            let _ = resp.send(lifecycle.record(&id).cloned());
        }
        Command::ActiveOrPending { resp } => {
            let records = lifecycle
                .active_or_pending()
                .into_iter()
                .cloned()
                .collect();
            let _ = resp.send(records);
        }
        Command::Delivered { resp } => {
            let records = lifecycle.delivered().into_iter().cloned().collect();
            let _ = resp.send(records);
        }
        Command::Completions { resp } => {
            let _ = resp.send(lifecycle.completions().to_vec());
        }
        Command::FindRoute { destination, resp } => {
            let route = lifecycle.graph().find_route(&destination);
            let minutes = lifecycle.graph().travel_time(&route);
            let _ = resp.send((route, minutes));
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
