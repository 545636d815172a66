// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::AppContext;
use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::domain::connection::services::DirectoryService;
use crate::domain::invitations::services::InvitationQueue;
use crate::domain::membership::models::RosterUpdate;
use crate::domain::membership::services::{
    MembershipActionQueue, MembershipReconciler, ReconciliationObserver,
};
use crate::domain::rooms::repos::{RoomConfigRepository, RoomRegistry};
use crate::domain::rooms::services::{
    ChatHistoryService, RoomActivityRanking, RoomMembershipService,
};
use crate::domain::shared::models::StartupBuffer;
use crate::domain::shared::services::TimeProvider;

pub type DynAppContext = Arc<AppContext>;
pub type DynChatHistoryService = Arc<dyn ChatHistoryService>;
pub type DynClientEventDispatcher = Arc<dyn ClientEventDispatcherTrait>;
pub type DynDirectoryService = Arc<dyn DirectoryService>;
pub type DynInvitationQueue = Arc<dyn InvitationQueue>;
pub type DynMembershipActionQueue = Arc<dyn MembershipActionQueue>;
pub type DynMembershipReconciler = Arc<dyn MembershipReconciler>;
pub type DynReconciliationObserver = Arc<dyn ReconciliationObserver>;
pub type DynRoomActivityRanking = Arc<dyn RoomActivityRanking>;
pub type DynRoomConfigRepository = Arc<dyn RoomConfigRepository>;
pub type DynRoomMembershipService = Arc<dyn RoomMembershipService>;
pub type DynRoomRegistry = Arc<dyn RoomRegistry>;
pub type DynRosterUpdateBuffer = Arc<StartupBuffer<RosterUpdate>>;
pub type DynTimeProvider = Arc<dyn TimeProvider>;

pub struct AppDependencies {
    pub action_queue: DynMembershipActionQueue,
    pub chat_history_service: DynChatHistoryService,
    pub client_event_dispatcher: DynClientEventDispatcher,
    pub ctx: DynAppContext,
    pub directory_service: DynDirectoryService,
    pub invitation_queue: DynInvitationQueue,
    pub membership_reconciler: DynMembershipReconciler,
    pub pending_roster_updates: DynRosterUpdateBuffer,
    pub room_activity_ranking: DynRoomActivityRanking,
    pub room_config_repo: DynRoomConfigRepository,
    pub room_membership_service: DynRoomMembershipService,
    pub room_registry: DynRoomRegistry,
    pub time_provider: DynTimeProvider,
}
