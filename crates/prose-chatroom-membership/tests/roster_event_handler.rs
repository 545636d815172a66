// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::{anyhow, Result};
use mockall::{predicate, Sequence};
use pretty_assertions::assert_eq;

use prose_chatroom_membership::app::event_handlers::{
    ConnectionEvent, RosterEvent, RosterEventHandler, ServerEvent, ServerEventHandler,
};
use prose_chatroom_membership::domain::membership::models::RosterUpdate;
use prose_chatroom_membership::test::MockAppDependencies;
use prose_chatroom_membership::{bare, room_id};

fn snapshot_entry(jid: &str) -> ServerEvent {
    ServerEvent::Roster(RosterEvent::SnapshotEntry {
        jid: bare!(jid),
        name: None,
    })
}

#[tokio::test]
async fn test_reports_configured_rooms_missing_from_snapshot() -> Result<()> {
    let mut deps = MockAppDependencies::default();
    let mut seq = Sequence::new();

    deps.membership_reconciler
        .expect_room_seen_in_roster()
        .once()
        .in_sequence(&mut seq)
        .with(predicate::eq(room_id!("a@conference.prose.org")))
        .return_once(|_| Box::pin(async {}));
    deps.room_config_repo
        .expect_get_all()
        .once()
        .in_sequence(&mut seq)
        .return_once(|| {
            Box::pin(async {
                Ok(vec![
                    room_id!("a@conference.prose.org"),
                    room_id!("b@conference.prose.org"),
                    room_id!("c@conference.prose.org"),
                ])
            })
        });
    deps.membership_reconciler
        .expect_room_absent_from_roster()
        .once()
        .in_sequence(&mut seq)
        .with(predicate::eq(room_id!("b@conference.prose.org")))
        .return_once(|_| Box::pin(async {}));
    deps.membership_reconciler
        .expect_room_absent_from_roster()
        .once()
        .in_sequence(&mut seq)
        .with(predicate::eq(room_id!("c@conference.prose.org")))
        .return_once(|_| Box::pin(async {}));
    deps.membership_reconciler
        .expect_roster_processing_completed()
        .once()
        .in_sequence(&mut seq)
        .return_once(|| Box::pin(async {}));

    let event_handler = RosterEventHandler::from(&deps.into_deps());

    assert_eq!(
        event_handler
            .handle_event(snapshot_entry("a@conference.prose.org"))
            .await?,
        None
    );
    // Contacts and rooms of other services are not ours to reconcile.
    event_handler
        .handle_event(snapshot_entry("mark@prose.org"))
        .await?;
    event_handler
        .handle_event(snapshot_entry("lounge@chat.example.org"))
        .await?;
    event_handler
        .handle_event(ServerEvent::Roster(RosterEvent::SnapshotCompleted))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_completes_roster_processing_if_repository_fails() -> Result<()> {
    let mut deps = MockAppDependencies::default();

    deps.room_config_repo
        .expect_get_all()
        .once()
        .return_once(|| Box::pin(async { Err(anyhow!("database is locked")) }));
    deps.membership_reconciler
        .expect_room_absent_from_roster()
        .never();
    deps.membership_reconciler
        .expect_roster_processing_completed()
        .once()
        .return_once(|| Box::pin(async {}));

    let event_handler = RosterEventHandler::from(&deps.into_deps());
    event_handler
        .handle_event(ServerEvent::Roster(RosterEvent::SnapshotCompleted))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_holds_back_live_updates_until_reconciled() -> Result<()> {
    let mut deps = MockAppDependencies::default();

    deps.membership_reconciler
        .expect_room_seen_in_roster()
        .never();
    deps.membership_reconciler
        .expect_room_absent_from_roster()
        .once()
        .with(predicate::eq(room_id!("b@conference.prose.org")))
        .return_once(|_| Box::pin(async {}));

    let deps = deps.into_deps();
    let event_handler = RosterEventHandler::from(&deps);

    event_handler
        .handle_event(ServerEvent::Roster(RosterEvent::EntryAdded {
            jid: bare!("a@conference.prose.org"),
            name: Some("Room A".to_string()),
        }))
        .await?;

    assert!(deps.pending_roster_updates.begin_draining());
    assert_eq!(
        deps.pending_roster_updates.next_for_drain(),
        Some(RosterUpdate::Added(room_id!("a@conference.prose.org")))
    );
    assert_eq!(deps.pending_roster_updates.next_for_drain(), None);

    event_handler
        .handle_event(ServerEvent::Roster(RosterEvent::EntryRemoved {
            jid: bare!("b@conference.prose.org"),
        }))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_forgets_snapshot_on_reconnect() -> Result<()> {
    let mut deps = MockAppDependencies::default();

    deps.membership_reconciler
        .expect_room_seen_in_roster()
        .once()
        .return_once(|_| Box::pin(async {}));
    deps.room_config_repo
        .expect_get_all()
        .once()
        .return_once(|| Box::pin(async { Ok(vec![room_id!("a@conference.prose.org")]) }));
    deps.membership_reconciler
        .expect_room_absent_from_roster()
        .once()
        .with(predicate::eq(room_id!("a@conference.prose.org")))
        .return_once(|_| Box::pin(async {}));
    deps.membership_reconciler
        .expect_roster_processing_completed()
        .once()
        .return_once(|| Box::pin(async {}));

    let event_handler = RosterEventHandler::from(&deps.into_deps());

    event_handler
        .handle_event(snapshot_entry("a@conference.prose.org"))
        .await?;

    let connected = ServerEvent::Connection(ConnectionEvent::Connected);
    assert_eq!(
        event_handler.handle_event(connected.clone()).await?,
        Some(connected)
    );

    event_handler
        .handle_event(ServerEvent::Roster(RosterEvent::SnapshotCompleted))
        .await?;

    Ok(())
}
