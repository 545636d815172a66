// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::app::deps::{
    AppDependencies, DynMembershipActionQueue, DynRoomMembershipService, DynRoomRegistry,
};
use crate::domain::rooms::models::{RoomError, RoomSession};
use crate::domain::shared::models::RoomId;

/// The room operations offered to the host application.
///
/// Joins and leaves run on the membership action queue, after everything the reconciler
/// scheduled before them.
pub struct ChatRoomsService {
    action_queue: DynMembershipActionQueue,
    room_membership_service: DynRoomMembershipService,
    room_registry: DynRoomRegistry,
}

impl From<&AppDependencies> for ChatRoomsService {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            action_queue: deps.action_queue.clone(),
            room_membership_service: deps.room_membership_service.clone(),
            room_registry: deps.room_registry.clone(),
        }
    }
}

impl ChatRoomsService {
    pub async fn join_chat_room(
        &self,
        room_id: &RoomId,
        password: Option<String>,
    ) -> Result<Arc<RoomSession>, RoomError> {
        self.action_queue
            .enqueue_join_request(room_id.clone(), password)
            .await
            // The request was dropped by a reconnect.
            .unwrap_or(Err(RoomError::NotConnected))
    }

    pub async fn leave_chat_room(&self, room_id: &RoomId, left_at: Option<DateTime<Utc>>) {
        if self
            .action_queue
            .enqueue_leave_request(room_id.clone(), left_at)
            .await
            .is_err()
        {
            warn!("Leaving {room_id} was cancelled by a reconnect.");
        }
    }

    /// Returns the cached session or asks the server whether the room exists.
    pub async fn find_chat_room(&self, room_id: &RoomId) -> Option<Arc<RoomSession>> {
        self.room_membership_service.find_room(room_id).await
    }

    pub fn currently_joined_rooms(&self) -> Vec<Arc<RoomSession>> {
        self.room_registry.joined_rooms()
    }

    pub fn active_room_count(&self) -> usize {
        self.room_registry.active_room_count()
    }
}
