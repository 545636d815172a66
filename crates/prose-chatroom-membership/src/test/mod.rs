// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use constant_time_provider::ConstantTimeProvider;
pub use mock_app_dependencies::{MockAppDependencies, MockRoomMembershipServiceDependencies};
pub use recording_action_queue::RecordingActionQueue;
pub use recording_client_delegate::RecordingClientDelegate;

mod constant_time_provider;
mod mock_app_dependencies;
mod recording_client_delegate;

pub mod mock_data {
    pub use super::mock_app_dependencies::{
        mock_account_jid as account_jid, mock_muc_service as muc_service,
        mock_nickname as nickname, mock_reference_date as reference_date,
    };
}

#[macro_export]
macro_rules! room_id {
    ($jid:expr) => {
        $crate::dtos::RoomId::from($jid.parse::<jid::BareJid>().unwrap())
    };
}

#[macro_export]
macro_rules! bare {
    ($jid:expr) => {
        $jid.parse::<jid::BareJid>().unwrap()
    };
}
