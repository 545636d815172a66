// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::rooms::models::{JoinedRoom, RoomSession};
use crate::domain::shared::models::RoomId;

/// In-memory cache of `RoomSession`s keyed by their canonical id.
///
/// The registry also does the active-room accounting: the number returned by
/// `active_room_count` always equals the number of cached sessions in
/// `RoomLifecycle::Joined`.
#[cfg_attr(feature = "test", mockall::automock)]
pub trait RoomRegistry: Send + Sync {
    /// Returns the cached session for `room_id`. Sessions that were moved to the backup cache
    /// on disconnect are moved back into the live cache.
    fn get(&self, room_id: &RoomId) -> Option<Arc<RoomSession>>;

    /// Inserts `session` unless a session for the same room exists already. Returns the
    /// session that is cached after the call.
    fn insert(&self, session: Arc<RoomSession>) -> Arc<RoomSession>;

    /// Removes the session from the registry and returns it.
    fn remove(&self, room_id: &RoomId) -> Option<Arc<RoomSession>>;

    fn joined_rooms(&self) -> Vec<Arc<RoomSession>>;
    fn active_room_count(&self) -> usize;

    /// Transitions the cached session into `Joined` and increments the active-room count.
    /// Returns false if there is no such session or it could not be joined.
    fn mark_joined(&self, room_id: &RoomId, joined_room: JoinedRoom, at: DateTime<Utc>) -> bool;

    /// Transitions the cached session into `Left`. The active-room count is decremented if
    /// the session was joined.
    fn mark_left(&self, room_id: &RoomId) -> bool;

    /// Moves all live sessions into the backup cache and marks them as left. The active-room
    /// count drops to zero.
    fn move_to_backup(&self);

    fn clear_backup(&self);
}
