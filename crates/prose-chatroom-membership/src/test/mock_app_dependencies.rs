// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use derivative::Derivative;
use jid::BareJid;
use parking_lot::RwLock;

use crate::app::deps::{
    AppConfig, AppContext, AppDependencies, DynMembershipActionQueue, DynRoomRegistry,
    DynRosterUpdateBuffer, DynTimeProvider,
};
use crate::app::event_handlers::MockClientEventDispatcherTrait;
use crate::domain::connection::models::ConnectionProperties;
use crate::domain::connection::services::mocks::MockDirectoryService;
use crate::domain::invitations::services::mocks::MockInvitationQueue;
use crate::domain::membership::services::mocks::MockMembershipReconciler;
use crate::domain::rooms::repos::mocks::{MockRoomConfigRepository, MockRoomRegistry};
use crate::domain::rooms::services::impls::RoomMembershipServiceDependencies;
use crate::domain::rooms::services::mocks::{
    MockChatHistoryService, MockRoomActivityRanking, MockRoomMembershipService,
};
use crate::domain::shared::models::Nickname;
use crate::infra::rooms::InMemoryRoomRegistry;
use crate::test::{ConstantTimeProvider, RecordingActionQueue};

pub fn mock_reference_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 18, 9, 0, 0).unwrap()
}

pub fn mock_muc_service() -> BareJid {
    "conference.prose.org".parse().unwrap()
}

pub fn mock_account_jid() -> BareJid {
    "jane.doe@prose.org".parse().unwrap()
}

pub fn mock_nickname() -> Nickname {
    Nickname::from("jane.doe")
}

impl Default for AppContext {
    fn default() -> Self {
        AppContext {
            connection_properties: RwLock::new(Some(ConnectionProperties {
                connected_jid: mock_account_jid(),
                nickname: mock_nickname(),
                muc_service: Some(mock_muc_service()),
            })),
            config: AppConfig::default(),
        }
    }
}

#[derive(Derivative)]
#[derivative(Default)]
pub struct MockAppDependencies {
    #[derivative(Default(value = "Arc::new(RecordingActionQueue::new())"))]
    pub action_queue: DynMembershipActionQueue,
    pub chat_history_service: MockChatHistoryService,
    pub client_event_dispatcher: MockClientEventDispatcherTrait,
    pub ctx: AppContext,
    pub directory_service: MockDirectoryService,
    pub invitation_queue: MockInvitationQueue,
    pub membership_reconciler: MockMembershipReconciler,
    pub pending_roster_updates: DynRosterUpdateBuffer,
    pub room_activity_ranking: MockRoomActivityRanking,
    pub room_config_repo: MockRoomConfigRepository,
    pub room_membership_service: MockRoomMembershipService,
    pub room_registry: MockRoomRegistry,
    #[derivative(Default(value = "Arc::new(ConstantTimeProvider::new(mock_reference_date()))"))]
    pub time_provider: DynTimeProvider,
}

impl MockAppDependencies {
    pub fn into_deps(self) -> AppDependencies {
        AppDependencies::from(self)
    }
}

impl From<MockAppDependencies> for AppDependencies {
    fn from(mock: MockAppDependencies) -> Self {
        AppDependencies {
            action_queue: mock.action_queue,
            chat_history_service: Arc::new(mock.chat_history_service),
            client_event_dispatcher: Arc::new(mock.client_event_dispatcher),
            ctx: Arc::new(mock.ctx),
            directory_service: Arc::new(mock.directory_service),
            invitation_queue: Arc::new(mock.invitation_queue),
            membership_reconciler: Arc::new(mock.membership_reconciler),
            pending_roster_updates: mock.pending_roster_updates,
            room_activity_ranking: Arc::new(mock.room_activity_ranking),
            room_config_repo: Arc::new(mock.room_config_repo),
            room_membership_service: Arc::new(mock.room_membership_service),
            room_registry: Arc::new(mock.room_registry),
            time_provider: mock.time_provider,
        }
    }
}

/// Wires the room membership service against mocks, except for the registry which is the
/// in-memory one so that its bookkeeping can be observed.
#[derive(Derivative)]
#[derivative(Default)]
pub struct MockRoomMembershipServiceDependencies {
    pub chat_history_service: MockChatHistoryService,
    pub client_event_dispatcher: MockClientEventDispatcherTrait,
    pub ctx: AppContext,
    pub directory_service: MockDirectoryService,
    pub room_activity_ranking: MockRoomActivityRanking,
    pub room_config_repo: MockRoomConfigRepository,
    #[derivative(Default(value = "Arc::new(InMemoryRoomRegistry::new())"))]
    pub room_registry: DynRoomRegistry,
    #[derivative(Default(value = "Arc::new(ConstantTimeProvider::new(mock_reference_date()))"))]
    pub time_provider: DynTimeProvider,
}

impl MockRoomMembershipServiceDependencies {
    pub fn into_deps(self) -> RoomMembershipServiceDependencies {
        RoomMembershipServiceDependencies::from(self)
    }
}

impl From<MockRoomMembershipServiceDependencies> for RoomMembershipServiceDependencies {
    fn from(value: MockRoomMembershipServiceDependencies) -> Self {
        Self {
            chat_history_service: Arc::new(value.chat_history_service),
            client_event_dispatcher: Arc::new(value.client_event_dispatcher),
            ctx: Arc::new(value.ctx),
            directory_service: Arc::new(value.directory_service),
            room_activity_ranking: Arc::new(value.room_activity_ranking),
            room_config_repo: Arc::new(value.room_config_repo),
            room_registry: value.room_registry,
            time_provider: value.time_provider,
        }
    }
}
