// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::rooms::models::{Member, MemberRole};
use crate::domain::shared::models::RoomId;

/// What the server told us about a room during discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub name: Option<String>,
}

/// The outcome of a successful join.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoinedRoom {
    pub members: Vec<Member>,
    pub role: MemberRole,
}
