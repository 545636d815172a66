// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use nickname::Nickname;
pub use room_id::RoomId;
pub use startup_buffer::{BufferPhase, StartupBuffer};

mod nickname;
mod room_id;
mod startup_buffer;
