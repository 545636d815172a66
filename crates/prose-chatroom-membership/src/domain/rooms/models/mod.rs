// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use member::{Member, MemberRole};
pub use room_error::RoomError;
pub use room_info::{JoinedRoom, RoomInfo};
pub use room_lifecycle::RoomLifecycle;
pub use room_session::RoomSession;

mod member;
mod room_error;
mod room_info;
mod room_lifecycle;
mod room_session;
