// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use client_event::{ClientEvent, ConnectionEvent};
pub use provider::{
    ClientDelegate, ProtocolProvider, ProtocolProviderBuilder, ProtocolProviderInner,
    UndefinedDirectoryService,
};

#[cfg(feature = "test")]
pub mod test;

pub mod app;
mod client_event;
mod provider;

#[cfg(feature = "test")]
pub mod domain;
#[cfg(not(feature = "test"))]
pub(crate) mod domain;

#[cfg(feature = "test")]
pub mod infra;
#[cfg(not(feature = "test"))]
pub(crate) mod infra;

pub mod dtos {
    pub use crate::app::event_handlers::{
        ArchiveEvent, ConnectionEvent as ServerConnectionEvent, InvitationEvent, RosterEvent,
        ServerEvent,
    };
    pub use crate::domain::connection::models::{ConnectionError, ConnectionProperties};
    pub use crate::domain::invitations::models::InvitationRecord;
    pub use crate::domain::membership::models::ArchiveEventKind;
    pub use crate::domain::rooms::models::{
        JoinedRoom, Member, MemberRole, RoomError, RoomInfo, RoomLifecycle, RoomSession,
    };
    pub use crate::domain::shared::models::{Nickname, RoomId};
}

/// The seams a host application implements to plug the provider into its environment.
pub mod services {
    pub use crate::app::deps::AppConfig;
    pub use crate::domain::connection::services::DirectoryService;
    pub use crate::domain::rooms::repos::RoomConfigRepository;
    pub use crate::domain::rooms::services::{ChatHistoryService, RoomActivityRanking};
    pub use crate::domain::shared::services::{SystemTimeProvider, TimeProvider};
}
