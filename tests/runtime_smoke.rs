use std::time::Duration;

use dispatchlog::{
    lifecycle::{DeliveryLifecycle, LifecycleError},
    parcel::DeliveryDraft,
    runtime::{
        events::DeliveryEvent,
        handle::{spawn_dispatchlog, RuntimeConfig, RuntimeError},
    },
    types::Status,
};

fn draft(id: &str, destination: &str) -> DeliveryDraft {
    DeliveryDraft {
        id: id.to_string(),
        sender: "Ana".to_string(),
        receiver: "Ben".to_string(),
        destination: destination.to_string(),
    }
}

async fn next_event(sub: &mut tokio::sync::broadcast::Receiver<DeliveryEvent>) -> DeliveryEvent {
    tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event timeout")
        .expect("recv")
}

#[tokio::test]
async fn runtime_register_update_query_and_events_ordered() {
    let handle = spawn_dispatchlog(
        DeliveryLifecycle::with_warehouse_map(),
        RuntimeConfig::default(),
    );
    let mut sub = handle.subscribe();

    let first = handle.register(draft("P1", "AreaD")).await.expect("register");
    let second = handle.register(draft("P2", "AreaE")).await.expect("register");
    assert_eq!(first, Status::Dispatched);
    assert_eq!(second, Status::Pending);

    let change = handle.set_status("P1", 4).await.expect("set status");
    assert!(change.completed);
    assert_eq!(change.auto_dispatched, Some("P2".to_string()));

    assert_eq!(
        next_event(&mut sub).await,
        DeliveryEvent::Registered {
            id: "P1".to_string(),
            status: Status::Dispatched,
        }
    );
    assert_eq!(
        next_event(&mut sub).await,
        DeliveryEvent::Registered {
            id: "P2".to_string(),
            status: Status::Pending,
        }
    );
    assert_eq!(
        next_event(&mut sub).await,
        DeliveryEvent::StatusUpdated {
            id: "P1".to_string(),
            old: Status::Dispatched,
            new: Status::Delivered,
        }
    );
    assert_eq!(
        next_event(&mut sub).await,
        DeliveryEvent::Completed {
            id: "P1".to_string(),
            total_time: 6,
        }
    );
    assert_eq!(
        next_event(&mut sub).await,
        DeliveryEvent::AutoDispatched {
            id: "P2".to_string(),
        }
    );

    let record = handle.get("P2").await.expect("get").expect("record");
    assert_eq!(record.status, Status::Dispatched);

    let delivered = handle.delivered().await.expect("delivered");
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].id, "P1");

    let completions = handle.completions().await.expect("completions");
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].route, ["Warehouse", "AreaA", "AreaD"]);

    let (route, minutes) = handle.find_route("AreaF").await.expect("route");
    assert_eq!(route, ["Warehouse", "AreaB", "AreaF"]);
    assert_eq!(minutes, 8);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn runtime_surfaces_lifecycle_errors() {
    let handle = spawn_dispatchlog(
        DeliveryLifecycle::with_warehouse_map(),
        RuntimeConfig::default(),
    );

    handle.register(draft("P1", "AreaC")).await.expect("register");

    let err = handle.register(draft("P1", "AreaD")).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Lifecycle(LifecycleError::DuplicateId(_))
    ));

    let err = handle.set_status("P1", 9).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Lifecycle(LifecycleError::InvalidStatusCode(9))
    ));

    let open = handle.active_or_pending().await.expect("listing");
    assert_eq!(open.len(), 1);

    handle.shutdown().await.expect("shutdown");
}
