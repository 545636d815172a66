// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::RoomId;

#[cfg_attr(feature = "test", mockall::automock)]
pub trait RoomActivityRanking: Send + Sync {
    /// Orders `candidates` by activity, least active room first.
    fn least_active_rooms(&self, candidates: Vec<RoomId>) -> Vec<RoomId>;
}
