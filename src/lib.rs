//! In-memory parcel delivery tracking with FIFO dispatch and route pathfinding.
//!
//! # Examples
//!
//! Synchronous usage with [`lifecycle::DeliveryLifecycle`]:
//! ```
//! use dispatchlog::{
//!     lifecycle::DeliveryLifecycle,
//!     parcel::DeliveryDraft,
//!     types::Status,
//! };
//!
//! let mut lifecycle = DeliveryLifecycle::with_warehouse_map();
//! let status = lifecycle.register(DeliveryDraft {
//!     id: "PKG-001".to_string(),
//!     sender: "Ana".to_string(),
//!     receiver: "Ben".to_string(),
//!     destination: "AreaD".to_string(),
//! }).expect("register");
//! assert_eq!(status, Status::Dispatched);
//!
//! let change = lifecycle.set_status("PKG-001", 4).expect("set status");
//! assert!(change.completed);
//! assert_eq!(lifecycle.completions()[0].total_time, 6);
//! ```
//!
//! Async usage through the single-writer runtime:
//! ```
//! use dispatchlog::{
//!     lifecycle::DeliveryLifecycle,
//!     parcel::DeliveryDraft,
//!     runtime::handle::{spawn_dispatchlog, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_dispatchlog(
//!     DeliveryLifecycle::with_warehouse_map(),
//!     RuntimeConfig::default(),
//! );
//! let _status = handle.register(DeliveryDraft {
//!     id: "PKG-001".to_string(),
//!     sender: "Ana".to_string(),
//!     receiver: "Ben".to_string(),
//!     destination: "AreaC".to_string(),
//! }).await.expect("register");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```

/// In-memory store and dispatch queue.
pub mod core;
/// Orchestrator tying store, queue, and graph together.
pub mod lifecycle;
/// Delivery domain records.
pub mod parcel;
/// Static route graph and BFS pathfinding.
pub mod route;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Report grouping and sorting utilities.
pub mod sort;
/// Shared primitive types and enums.
pub mod types;
