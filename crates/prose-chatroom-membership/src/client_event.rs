// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::BareJid;

use crate::domain::connection::models::ConnectionError;
use crate::domain::shared::models::RoomId;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// The status of the connection has changed.
    ConnectionStatusChanged { event: ConnectionEvent },

    /// The local user is now an occupant of the room.
    RoomJoined { room_id: RoomId },

    /// The local user left the room, either on request or because the roster said so.
    RoomLeft { room_id: RoomId },

    /// The room was left and dropped from the registry to stay below the active-room cap.
    RoomEvicted { room_id: RoomId },

    /// An invitation was accepted. Historical invitations were sent while we were offline.
    InvitationReceived {
        room_id: RoomId,
        inviter: BareJid,
        reason: Option<String>,
        is_historical: bool,
    },

    /// The initial roster and archive were reconciled. Queued invitations and roster
    /// updates are being processed now.
    RosterFullyProcessed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Connect,
    Disconnect { error: Option<ConnectionError> },
}
