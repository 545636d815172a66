// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use in_memory_chat_history_service::InMemoryChatHistoryService;
pub use in_memory_room_config_repository::InMemoryRoomConfigRepository;
pub use in_memory_room_registry::InMemoryRoomRegistry;
pub use join_order_activity_ranking::JoinOrderActivityRanking;

mod in_memory_chat_history_service;
mod in_memory_room_config_repository;
mod in_memory_room_registry;
mod join_order_activity_ranking;
