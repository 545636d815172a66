// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::app::deps::DynRoomRegistry;
use crate::domain::rooms::services::RoomActivityRanking;
use crate::domain::shared::models::RoomId;

/// Ranks rooms by the date they were joined, the room joined first being the least active.
/// Used when the host application does not track room activity itself.
pub struct JoinOrderActivityRanking {
    room_registry: DynRoomRegistry,
}

impl JoinOrderActivityRanking {
    pub fn new(room_registry: DynRoomRegistry) -> Self {
        Self { room_registry }
    }
}

impl RoomActivityRanking for JoinOrderActivityRanking {
    fn least_active_rooms(&self, candidates: Vec<RoomId>) -> Vec<RoomId> {
        let mut ranked = candidates
            .into_iter()
            .map(|room_id| {
                let joined_at = self
                    .room_registry
                    .get(&room_id)
                    .and_then(|session| session.joined_at());
                (joined_at, room_id)
            })
            .collect::<Vec<_>>();
        // Stable sort, `None` sorts first.
        ranked.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));
        ranked.into_iter().map(|(_, room_id)| room_id).collect()
    }
}
