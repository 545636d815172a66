// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use room_config_repository::RoomConfigRepository;
pub use room_registry::RoomRegistry;

mod room_config_repository;
mod room_registry;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::room_config_repository::MockRoomConfigRepository;
    pub use super::room_registry::MockRoomRegistry;
}
