use proptest::prelude::*;

use dispatchlog::{
    lifecycle::DeliveryLifecycle,
    parcel::{DeliveryDraft, DeliveryRecord},
    sort::{group_then_sort, sort_by_key, SortKey},
    types::Status,
};

#[derive(Debug, Clone)]
enum Action {
    Register { dest_idx: u8 },
    Deliver { target: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..8).prop_map(|dest_idx| Action::Register { dest_idx }),
        (0u8..24).prop_map(|target| Action::Deliver { target }),
    ]
}

fn destination(dest_idx: u8) -> String {
    // Mix of routable areas and one off-map name.
    match dest_idx % 8 {
        0 => "AreaA".to_string(),
        1 => "AreaB".to_string(),
        2 => "AreaC".to_string(),
        3 => "AreaD".to_string(),
        4 => "AreaE".to_string(),
        5 => "AreaF".to_string(),
        6 => "Warehouse".to_string(),
        _ => "OffMap".to_string(),
    }
}

fn active_count(lc: &DeliveryLifecycle) -> usize {
    lc.store()
        .all()
        .iter()
        .filter(|r| r.status.is_active())
        .count()
}

proptest! {
    #[test]
    fn register_deliver_sequences_hold_core_invariants(
        actions in prop::collection::vec(action_strategy(), 1..120),
    ) {
        let mut lc = DeliveryLifecycle::with_warehouse_map();
        let mut next_id = 0u32;
        let mut registered: Vec<String> = Vec::new();

        for action in actions {
            match action {
                Action::Register { dest_idx } => {
                    let id = format!("P{next_id}");
                    next_id += 1;
                    let status = lc
                        .register(DeliveryDraft {
                            id: id.clone(),
                            sender: "S".to_string(),
                            receiver: "R".to_string(),
                            destination: destination(dest_idx),
                        })
                        .expect("fresh id");
                    registered.push(id.clone());
                    prop_assert!(lc.store().exists(&id));
                    prop_assert_eq!(lc.record(&id).unwrap().status, status);
                }
                Action::Deliver { target } => {
                    if registered.is_empty() {
                        continue;
                    }
                    let id = registered[usize::from(target) % registered.len()].clone();
                    lc.set_status(&id, 4).expect("known id");
                }
            }

            // Registration dispatches only into a quiescent store and every
            // completion hands off to at most one pending record, so
            // register/deliver traffic can never hold two active shipments.
            prop_assert!(active_count(&lc) <= 1);

            // Store order is registration order; nothing is ever removed.
            prop_assert_eq!(lc.store().ordered_ids(), registered.as_slice());
        }

        for completion in lc.completions() {
            prop_assert_eq!(completion.status, Status::Delivered);
            if completion.route.is_empty() {
                prop_assert_eq!(completion.total_time, 0);
                prop_assert_eq!(completion.route_display(), "N/A");
            } else {
                prop_assert_eq!(&completion.route[0], "Warehouse");
                prop_assert_eq!(
                    completion.route.last().unwrap(),
                    &completion.destination
                );
                prop_assert_eq!(
                    lc.graph().travel_time(&completion.route),
                    completion.total_time
                );
            }
        }
    }

    #[test]
    fn duplicate_registration_never_grows_the_store(
        dest_idx in 0u8..8,
        attempts in 1usize..5,
    ) {
        let mut lc = DeliveryLifecycle::with_warehouse_map();
        lc.register(DeliveryDraft {
            id: "P0".to_string(),
            sender: "S".to_string(),
            receiver: "R".to_string(),
            destination: destination(dest_idx),
        })
        .expect("fresh id");

        for _ in 0..attempts {
            let duplicate = lc.register(DeliveryDraft {
                id: "P0".to_string(),
                sender: "other".to_string(),
                receiver: "other".to_string(),
                destination: "AreaA".to_string(),
            });
            prop_assert!(duplicate.is_err());
        }

        prop_assert_eq!(lc.store().len(), 1);
        prop_assert_eq!(lc.queue().len(), 1);
        prop_assert_eq!(&lc.record("P0").unwrap().sender, "S");
    }
}

fn record_strategy() -> impl Strategy<Value = DeliveryRecord> {
    (
        0u16..50,
        0u8..6,
        prop_oneof![
            Just(Status::Pending),
            Just(Status::Dispatched),
            Just(Status::OutForDelivery),
            Just(Status::Delivered),
        ],
    )
        .prop_map(|(id, dest, status)| DeliveryRecord {
            id: format!("P{id}"),
            sender: "S".to_string(),
            receiver: "R".to_string(),
            destination: format!("Area{dest}"),
            status,
        })
}

proptest! {
    #[test]
    fn sort_matches_a_stable_reference_sort(
        records in prop::collection::vec(record_strategy(), 0..40),
    ) {
        let sorted = sort_by_key(&records, SortKey::Destination);

        let mut reference = records.clone();
        reference.sort_by(|a, b| a.destination.cmp(&b.destination));
        prop_assert_eq!(&sorted, &reference);

        // Idempotence.
        prop_assert_eq!(sort_by_key(&sorted, SortKey::Destination), sorted);
    }

    #[test]
    fn group_then_sort_preserves_records_and_group_rank(
        records in prop::collection::vec(record_strategy(), 0..40),
    ) {
        let sorted = group_then_sort(&records, SortKey::Status, SortKey::Destination);
        prop_assert_eq!(sorted.len(), records.len());

        // Group ranks are non-decreasing and ties within a group are sorted
        // by destination.
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].status.rank() <= pair[1].status.rank());
            if pair[0].status == pair[1].status {
                prop_assert!(pair[0].destination <= pair[1].destination);
            }
        }

        let mut expected = records.clone();
        expected.sort_by(|a, b| {
            a.status
                .rank()
                .cmp(&b.status.rank())
                .then_with(|| a.destination.cmp(&b.destination))
        });
        prop_assert_eq!(sorted, expected);
    }
}
