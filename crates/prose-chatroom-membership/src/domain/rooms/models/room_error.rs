// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::RoomId;

#[derive(thiserror::Error, Debug)]
pub enum RoomError {
    #[error("Not connected.")]
    NotConnected,
    #[error("Room {0} could not be found.")]
    RoomNotFound(RoomId),
    #[error("Failed to join room {room_id}: {reason}")]
    JoinFailed { room_id: RoomId, reason: String },
    #[error("Failed to leave room {room_id}: {reason}")]
    LeaveFailed { room_id: RoomId, reason: String },
    #[error(transparent)]
    InvalidRoomId(#[from] jid::Error),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
