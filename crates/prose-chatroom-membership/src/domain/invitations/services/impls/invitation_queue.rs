// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::deps::{DynClientEventDispatcher, DynMembershipActionQueue, DynRoomRegistry};
use crate::domain::invitations::models::InvitationRecord;
use crate::domain::membership::models::MembershipAction;
use crate::domain::rooms::models::RoomSession;
use crate::domain::shared::models::{BufferPhase, StartupBuffer};
use crate::ClientEvent;

use super::super::InvitationQueue as InvitationQueueTrait;

pub struct InvitationQueueDependencies {
    pub action_queue: DynMembershipActionQueue,
    pub client_event_dispatcher: DynClientEventDispatcher,
    pub room_registry: DynRoomRegistry,
}

pub struct InvitationQueue {
    action_queue: DynMembershipActionQueue,
    buffer: StartupBuffer<InvitationRecord>,
    client_event_dispatcher: DynClientEventDispatcher,
    room_registry: DynRoomRegistry,
}

impl From<InvitationQueueDependencies> for InvitationQueue {
    fn from(deps: InvitationQueueDependencies) -> Self {
        Self {
            action_queue: deps.action_queue,
            buffer: StartupBuffer::new(),
            client_event_dispatcher: deps.client_event_dispatcher,
            room_registry: deps.room_registry,
        }
    }
}

impl InvitationQueueTrait for InvitationQueue {
    fn handle_invitation(&self, invitation: InvitationRecord) {
        let Some(invitation) = self.buffer.offer(invitation) else {
            debug!("Queued invitation until the roster has been processed.");
            return;
        };
        self.accept_invitation(invitation)
    }

    fn drain(&self) {
        if !self.buffer.begin_draining() {
            return;
        }
        info!("Replaying {} queued invitations…", self.buffer.len());
        while let Some(invitation) = self.buffer.next_for_drain() {
            self.accept_invitation(invitation)
        }
    }

    fn phase(&self) -> BufferPhase {
        self.buffer.phase()
    }

    fn reset(&self) {
        self.buffer.reset()
    }
}

impl InvitationQueue {
    fn accept_invitation(&self, invitation: InvitationRecord) {
        let room_id = invitation.room_id.clone();
        let session = self.room_registry.get(&room_id).unwrap_or_else(|| {
            self.room_registry
                .insert(Arc::new(RoomSession::discovered(room_id.clone(), None)))
        });

        let timestamp = invitation.effective_timestamp();

        if !session.mark_invited(timestamp) {
            debug!("Ignoring re-delivered invitation to {room_id}.");
            return;
        }

        info!(
            "Accepting {} invitation to {room_id} from {}.",
            if invitation.is_historical() {
                "historical"
            } else {
                "real-time"
            },
            invitation.inviter
        );

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::InvitationReceived {
                room_id: room_id.clone(),
                inviter: invitation.inviter.clone(),
                reason: invitation.reason.clone(),
                is_historical: invitation.is_historical(),
            });

        if session.is_joined() {
            return;
        }

        self.action_queue.enqueue(
            MembershipAction::join(room_id, Some(timestamp)).with_password(invitation.password),
        );
    }
}
