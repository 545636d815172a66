// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::rooms::models::{RoomError, RoomSession};
use crate::domain::shared::models::RoomId;

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait RoomMembershipService: Send + Sync {
    /// Returns the cached session for `room_id` or tries to discover the room on the server.
    ///
    /// Discovery failures are not errors, they are logged and reported as `None`.
    async fn find_room(&self, room_id: &RoomId) -> Option<Arc<RoomSession>>;

    /// Joins the room identified by `room_id`.
    ///
    /// - Returns the existing session if the room is joined already.
    /// - Falls back to the locally saved password if `password` is `None`.
    /// - Asks the server for history starting at `history_since` if set.
    /// - Saves the room to the local room configuration and enforces the active-room cap
    ///   after a successful join.
    async fn join_room(
        &self,
        room_id: &RoomId,
        password: Option<String>,
        history_since: Option<DateTime<Utc>>,
    ) -> Result<Arc<RoomSession>, RoomError>;

    /// Leaves the room identified by `room_id`.
    ///
    /// The local room configuration is deleted and the room's history is closed at `left_at`
    /// (or now) regardless of whether the server acknowledged the request.
    async fn leave_room(&self, room_id: &RoomId, left_at: Option<DateTime<Utc>>);

    /// Leaves the room and removes its session from the registry.
    async fn evict_room(&self, room_id: &RoomId, left_at: Option<DateTime<Utc>>);

    /// Leaves the least active rooms if the number of active rooms exceeds the configured cap.
    /// Returns the evicted rooms.
    async fn enforce_capacity(&self) -> Vec<RoomId>;
}
