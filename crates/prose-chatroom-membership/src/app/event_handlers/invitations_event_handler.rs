// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::app::deps::{AppDependencies, DynInvitationQueue, DynTimeProvider};
use crate::app::event_handlers::{InvitationEvent, ServerEvent, ServerEventHandler};
use crate::domain::invitations::models::InvitationRecord;

pub struct InvitationsEventHandler {
    invitation_queue: DynInvitationQueue,
    time_provider: DynTimeProvider,
}

impl From<&AppDependencies> for InvitationsEventHandler {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            invitation_queue: deps.invitation_queue.clone(),
            time_provider: deps.time_provider.clone(),
        }
    }
}

#[async_trait]
impl ServerEventHandler for InvitationsEventHandler {
    fn name(&self) -> &'static str {
        "invitations"
    }

    async fn handle_event(&self, event: ServerEvent) -> Result<Option<ServerEvent>> {
        match event {
            ServerEvent::Invitation(event) => self.handle_invitation(event),
            _ => return Ok(Some(event)),
        }
        Ok(None)
    }
}

impl InvitationsEventHandler {
    fn handle_invitation(&self, event: InvitationEvent) {
        self.invitation_queue.handle_invitation(InvitationRecord {
            room_id: event.room_id,
            inviter: event.inviter,
            reason: event.reason,
            password: event.password,
            raw_message: event.raw_message,
            delay: event.delay,
            received_at: self.time_provider.now(),
        })
    }
}
