// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockall::{predicate, Sequence};
use pretty_assertions::assert_eq;

use prose_chatroom_membership::app::deps::DynRoomRegistry;
use prose_chatroom_membership::app::event_handlers::MockClientEventDispatcherTrait;
use prose_chatroom_membership::domain::invitations::services::impls::{
    InvitationQueue, InvitationQueueDependencies,
};
use prose_chatroom_membership::domain::invitations::services::InvitationQueue as _;
use prose_chatroom_membership::domain::membership::models::MembershipAction;
use prose_chatroom_membership::domain::shared::models::BufferPhase;
use prose_chatroom_membership::dtos::{InvitationRecord, JoinedRoom, RoomId, RoomSession};
use prose_chatroom_membership::infra::rooms::InMemoryRoomRegistry;
use prose_chatroom_membership::test::{mock_data, RecordingActionQueue};
use prose_chatroom_membership::{bare, room_id, ClientEvent};

fn invitation(room_id: RoomId, delay: Option<DateTime<Utc>>) -> InvitationRecord {
    InvitationRecord {
        room_id,
        inviter: bare!("mark@prose.org"),
        reason: Some("Come join us".to_string()),
        password: None,
        raw_message: "<message/>".to_string(),
        delay,
        received_at: mock_data::reference_date(),
    }
}

fn invitation_event(room_id: RoomId, is_historical: bool) -> ClientEvent {
    ClientEvent::InvitationReceived {
        room_id,
        inviter: bare!("mark@prose.org"),
        reason: Some("Come join us".to_string()),
        is_historical,
    }
}

fn make_queue(
    client_event_dispatcher: MockClientEventDispatcherTrait,
) -> (InvitationQueue, Arc<RecordingActionQueue>, DynRoomRegistry) {
    let action_queue = Arc::new(RecordingActionQueue::new());
    let room_registry: DynRoomRegistry = Arc::new(InMemoryRoomRegistry::new());
    let queue = InvitationQueue::from(InvitationQueueDependencies {
        action_queue: action_queue.clone(),
        client_event_dispatcher: Arc::new(client_event_dispatcher),
        room_registry: room_registry.clone(),
    });
    (queue, action_queue, room_registry)
}

#[tokio::test]
async fn test_buffers_invitations_until_drained() {
    let mut dispatcher = MockClientEventDispatcherTrait::new();
    let mut seq = Sequence::new();

    let room_a = room_id!("a@conference.prose.org");
    let room_b = room_id!("b@conference.prose.org");

    dispatcher
        .expect_dispatch_event()
        .once()
        .in_sequence(&mut seq)
        .with(predicate::eq(invitation_event(room_a.clone(), false)))
        .return_const(());
    dispatcher
        .expect_dispatch_event()
        .once()
        .in_sequence(&mut seq)
        .with(predicate::eq(invitation_event(room_b.clone(), false)))
        .return_const(());

    let (queue, actions, _) = make_queue(dispatcher);
    assert_eq!(queue.phase(), BufferPhase::Buffering);

    queue.handle_invitation(invitation(room_a.clone(), None));
    queue.handle_invitation(invitation(room_b.clone(), None));
    assert!(actions.actions().is_empty());

    queue.drain();

    assert_eq!(queue.phase(), BufferPhase::Passthrough);
    assert_eq!(
        actions.take_actions(),
        vec![
            MembershipAction::join(room_a, Some(mock_data::reference_date())),
            MembershipAction::join(room_b, Some(mock_data::reference_date())),
        ]
    );
}

#[tokio::test]
async fn test_handles_invitations_immediately_after_drain() {
    let mut dispatcher = MockClientEventDispatcherTrait::new();
    dispatcher.expect_dispatch_event().once().return_const(());

    let (queue, actions, _) = make_queue(dispatcher);
    queue.drain();

    let room_id = room_id!("a@conference.prose.org");
    queue.handle_invitation(InvitationRecord {
        password: Some("secret".to_string()),
        ..invitation(room_id.clone(), None)
    });

    assert_eq!(
        actions.take_actions(),
        vec![
            MembershipAction::join(room_id, Some(mock_data::reference_date()))
                .with_password(Some("secret".to_string()))
        ]
    );
}

#[tokio::test]
async fn test_suppresses_redelivered_invitations() {
    let mut dispatcher = MockClientEventDispatcherTrait::new();
    dispatcher.expect_dispatch_event().once().return_const(());

    let (queue, actions, registry) = make_queue(dispatcher);
    let room_id = room_id!("a@conference.prose.org");

    queue.handle_invitation(invitation(room_id.clone(), None));
    queue.handle_invitation(invitation(room_id.clone(), None));
    queue.drain();

    assert_eq!(actions.take_actions().len(), 1);
    assert_eq!(
        registry.get(&room_id).and_then(|session| session.invited_at()),
        Some(mock_data::reference_date())
    );
}

#[tokio::test]
async fn test_historical_invitation_uses_delay_stamp() {
    let delay = mock_data::reference_date() - Duration::hours(5);
    let room_id = room_id!("a@conference.prose.org");

    let mut dispatcher = MockClientEventDispatcherTrait::new();
    dispatcher
        .expect_dispatch_event()
        .once()
        .with(predicate::eq(invitation_event(room_id.clone(), true)))
        .return_const(());

    let (queue, actions, _) = make_queue(dispatcher);
    queue.drain();
    queue.handle_invitation(invitation(room_id.clone(), Some(delay)));

    assert_eq!(
        actions.take_actions(),
        vec![MembershipAction::join(room_id, Some(delay))]
    );
}

#[tokio::test]
async fn test_invitation_to_joined_room_only_records_date() {
    let mut dispatcher = MockClientEventDispatcherTrait::new();
    dispatcher.expect_dispatch_event().once().return_const(());

    let (queue, actions, registry) = make_queue(dispatcher);
    let room_id = room_id!("a@conference.prose.org");

    registry.insert(Arc::new(RoomSession::discovered(room_id.clone(), None)));
    registry.mark_joined(&room_id, JoinedRoom::default(), mock_data::reference_date());

    queue.drain();
    queue.handle_invitation(invitation(room_id.clone(), None));

    assert!(actions.actions().is_empty());
    assert_eq!(
        registry.get(&room_id).and_then(|session| session.invited_at()),
        Some(mock_data::reference_date())
    );
}

#[tokio::test]
async fn test_invitation_after_leaving_is_handled_again() {
    let mut dispatcher = MockClientEventDispatcherTrait::new();
    dispatcher.expect_dispatch_event().times(2).return_const(());

    let (queue, actions, registry) = make_queue(dispatcher);
    let room_id = room_id!("a@conference.prose.org");
    let left_at = mock_data::reference_date() + Duration::hours(1);

    queue.drain();
    queue.handle_invitation(invitation(room_id.clone(), None));
    registry
        .get(&room_id)
        .expect("the invitation registers the room")
        .record_leave(left_at);

    // The first invitation once more, replayed from the archive.
    queue.handle_invitation(invitation(
        room_id.clone(),
        Some(mock_data::reference_date()),
    ));

    let mut second_invitation = invitation(room_id.clone(), None);
    second_invitation.received_at = left_at + Duration::minutes(5);
    queue.handle_invitation(second_invitation);

    assert_eq!(
        actions.take_actions(),
        vec![
            MembershipAction::join(room_id.clone(), Some(mock_data::reference_date())),
            MembershipAction::join(room_id, Some(left_at + Duration::minutes(5))),
        ]
    );
}

#[tokio::test]
async fn test_reset_drops_queued_invitations() {
    let mut dispatcher = MockClientEventDispatcherTrait::new();
    dispatcher.expect_dispatch_event().never();

    let (queue, actions, _) = make_queue(dispatcher);
    queue.handle_invitation(invitation(room_id!("a@conference.prose.org"), None));

    queue.reset();
    assert_eq!(queue.phase(), BufferPhase::Buffering);

    queue.drain();
    assert!(actions.actions().is_empty());
}
