// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use chat_history_service::ChatHistoryService;
pub use room_activity_ranking::RoomActivityRanking;
pub use room_membership_service::RoomMembershipService;

mod chat_history_service;
pub mod impls;
mod room_activity_ranking;
mod room_membership_service;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::chat_history_service::MockChatHistoryService;
    pub use super::room_activity_ranking::MockRoomActivityRanking;
    pub use super::room_membership_service::MockRoomMembershipService;
}
