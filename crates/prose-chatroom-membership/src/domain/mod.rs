// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod connection;
pub mod invitations;
pub mod membership;
pub mod rooms;
pub mod shared;
