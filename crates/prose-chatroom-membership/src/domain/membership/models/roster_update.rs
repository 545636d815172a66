// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::RoomId;

/// A live change to the roster that arrived after the initial snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterUpdate {
    Added(RoomId),
    Removed(RoomId),
}

impl RosterUpdate {
    pub fn room_id(&self) -> &RoomId {
        match self {
            RosterUpdate::Added(room_id) | RosterUpdate::Removed(room_id) => room_id,
        }
    }
}
