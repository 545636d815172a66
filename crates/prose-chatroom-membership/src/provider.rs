// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use jid::BareJid;

use crate::app::deps::{
    AppConfig, AppContext, AppDependencies, DynAppContext, DynChatHistoryService,
    DynClientEventDispatcher, DynDirectoryService, DynInvitationQueue, DynMembershipActionQueue,
    DynMembershipReconciler, DynReconciliationObserver, DynRoomActivityRanking,
    DynRoomConfigRepository, DynRoomMembershipService, DynRoomRegistry, DynTimeProvider,
};
use crate::app::event_handlers::{
    ArchiveEventHandler, ClientEventDispatcher, ConnectionEventHandler, InvitationsEventHandler,
    RosterEventHandler, ServerEvent, ServerEventHandlerQueue,
};
use crate::app::services::{ChatRoomsService, ConnectionService, InitialReconciliationHandler};
use crate::domain::connection::models::ConnectionError;
use crate::domain::invitations::services::impls::{
    InvitationQueue, InvitationQueueDependencies,
};
use crate::domain::membership::services::impls::{
    MembershipReconciler, MembershipReconcilerDependencies,
};
use crate::domain::rooms::services::impls::{
    RoomMembershipService, RoomMembershipServiceDependencies,
};
use crate::domain::shared::models::StartupBuffer;
use crate::domain::shared::services::{SystemTimeProvider, TimeProvider};
use crate::infra::membership::{SequentialActionQueue, SequentialActionQueueDependencies};
use crate::infra::rooms::{
    InMemoryChatHistoryService, InMemoryRoomConfigRepository, InMemoryRoomRegistry,
    JoinOrderActivityRanking,
};
use crate::ClientEvent;

/// Receives the `ClientEvent`s emitted by the provider.
pub trait ClientDelegate: Send + Sync {
    fn handle_event(&self, event: ClientEvent);
}

/// The chat room membership engine of an XMPP account.
///
/// Feed everything the server reports into `handle_server_event`. The provider decides which
/// rooms to join or leave and reports its decisions through the `ClientDelegate`.
#[derive(Clone)]
pub struct ProtocolProvider {
    inner: Arc<ProtocolProviderInner>,
}

pub struct ProtocolProviderInner {
    pub chat_rooms: ChatRoomsService,
    pub(crate) connection: ConnectionService,
    pub(crate) ctx: DynAppContext,
    pub(crate) membership_reconciler: DynMembershipReconciler,
    server_event_handler_queue: ServerEventHandlerQueue,
    // The reconciler only holds a weak reference.
    _reconciliation_observer: DynReconciliationObserver,
}

impl ProtocolProvider {
    pub fn builder() -> ProtocolProviderBuilder<UndefinedDirectoryService> {
        ProtocolProviderBuilder::new()
    }
}

impl Deref for ProtocolProvider {
    type Target = ProtocolProviderInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl ProtocolProvider {
    pub async fn connect(
        &self,
        account: &BareJid,
        password: impl AsRef<str>,
    ) -> Result<(), ConnectionError> {
        self.connection.connect(account, password).await
    }

    pub async fn disconnect(&self) {
        self.connection.disconnect().await
    }

    pub fn connected_jid(&self) -> Option<BareJid> {
        self.ctx.connected_jid().ok()
    }

    /// Hands an event received from the server to the provider. Failures are logged, never
    /// returned.
    pub async fn handle_server_event(&self, event: ServerEvent) {
        self.server_event_handler_queue.handle_event(event).await
    }

    /// Returns true once the initial roster and archive were reconciled in the current
    /// session.
    pub fn is_initial_reconciliation_completed(&self) -> bool {
        self.membership_reconciler
            .is_initial_reconciliation_completed()
    }
}

pub struct UndefinedDirectoryService;

pub struct ProtocolProviderBuilder<D> {
    app_config: AppConfig,
    chat_history_service: Option<DynChatHistoryService>,
    delegate: Option<Box<dyn ClientDelegate>>,
    directory_service: D,
    room_activity_ranking: Option<DynRoomActivityRanking>,
    room_config_repo: Option<DynRoomConfigRepository>,
    time_provider: DynTimeProvider,
}

impl ProtocolProviderBuilder<UndefinedDirectoryService> {
    pub(crate) fn new() -> Self {
        ProtocolProviderBuilder {
            app_config: Default::default(),
            chat_history_service: None,
            delegate: None,
            directory_service: UndefinedDirectoryService,
            room_activity_ranking: None,
            room_config_repo: None,
            time_provider: Arc::new(SystemTimeProvider::default()),
        }
    }

    pub fn set_directory_service(
        self,
        directory_service: DynDirectoryService,
    ) -> ProtocolProviderBuilder<DynDirectoryService> {
        ProtocolProviderBuilder {
            app_config: self.app_config,
            chat_history_service: self.chat_history_service,
            delegate: self.delegate,
            directory_service,
            room_activity_ranking: self.room_activity_ranking,
            room_config_repo: self.room_config_repo,
            time_provider: self.time_provider,
        }
    }
}

impl<D> ProtocolProviderBuilder<D> {
    pub fn set_config(mut self, config: AppConfig) -> Self {
        self.app_config = config;
        self
    }

    pub fn set_time_provider<T: TimeProvider + 'static>(mut self, time_provider: T) -> Self {
        self.time_provider = Arc::new(time_provider);
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }

    /// Defaults to an in-memory history that only records the closing dates.
    pub fn set_chat_history_service(mut self, service: DynChatHistoryService) -> Self {
        self.chat_history_service = Some(service);
        self
    }

    /// Defaults to ranking rooms by the date they were joined.
    pub fn set_room_activity_ranking(mut self, ranking: DynRoomActivityRanking) -> Self {
        self.room_activity_ranking = Some(ranking);
        self
    }

    /// Defaults to an in-memory repository.
    pub fn set_room_config_repository(mut self, repo: DynRoomConfigRepository) -> Self {
        self.room_config_repo = Some(repo);
        self
    }
}

impl ProtocolProviderBuilder<DynDirectoryService> {
    /// Wires up the provider. Must be called from within a Tokio runtime since the membership
    /// action queue runs on its own task.
    pub fn build(self) -> ProtocolProvider {
        let ctx = Arc::new(AppContext::new(self.app_config));
        let directory_service = self.directory_service;
        let time_provider = self.time_provider;

        let room_registry: DynRoomRegistry = Arc::new(InMemoryRoomRegistry::new());
        let room_activity_ranking = self.room_activity_ranking.unwrap_or_else(|| {
            Arc::new(JoinOrderActivityRanking::new(room_registry.clone()))
        });
        let chat_history_service = self
            .chat_history_service
            .unwrap_or_else(|| Arc::new(InMemoryChatHistoryService::new()));
        let room_config_repo = self
            .room_config_repo
            .unwrap_or_else(|| Arc::new(InMemoryRoomConfigRepository::new()));
        let client_event_dispatcher: DynClientEventDispatcher =
            Arc::new(ClientEventDispatcher::new(self.delegate));

        let room_membership_service = Arc::new(RoomMembershipService::from(
            RoomMembershipServiceDependencies {
                chat_history_service: chat_history_service.clone(),
                client_event_dispatcher: client_event_dispatcher.clone(),
                ctx: ctx.clone(),
                directory_service: directory_service.clone(),
                room_activity_ranking: room_activity_ranking.clone(),
                room_config_repo: room_config_repo.clone(),
                room_registry: room_registry.clone(),
                time_provider: time_provider.clone(),
            },
        ));

        let sequential_action_queue = Arc::new(SequentialActionQueue::from(
            SequentialActionQueueDependencies {
                ctx: ctx.clone(),
                directory_service: directory_service.clone(),
                room_membership_service: room_membership_service.clone(),
            },
        ));
        let action_queue: DynMembershipActionQueue = sequential_action_queue.clone();

        let membership_reconciler = Arc::new(MembershipReconciler::from(
            MembershipReconcilerDependencies {
                action_queue: action_queue.clone(),
            },
        ));

        // Both report membership changes the reconciler did not decide on.
        let dyn_membership_reconciler: DynMembershipReconciler = membership_reconciler.clone();
        room_membership_service
            .set_membership_reconciler(Arc::downgrade(&dyn_membership_reconciler));
        sequential_action_queue
            .set_membership_reconciler(Arc::downgrade(&dyn_membership_reconciler));
        let room_membership_service: DynRoomMembershipService = room_membership_service;

        let invitation_queue: DynInvitationQueue =
            Arc::new(InvitationQueue::from(InvitationQueueDependencies {
                action_queue: action_queue.clone(),
                client_event_dispatcher: client_event_dispatcher.clone(),
                room_registry: room_registry.clone(),
            }));

        let dependencies = AppDependencies {
            action_queue,
            chat_history_service,
            client_event_dispatcher,
            ctx,
            directory_service,
            invitation_queue,
            membership_reconciler: membership_reconciler.clone(),
            pending_roster_updates: Arc::new(StartupBuffer::new()),
            room_activity_ranking,
            room_config_repo,
            room_membership_service,
            room_registry,
            time_provider,
        };

        let reconciliation_observer: DynReconciliationObserver =
            Arc::new(InitialReconciliationHandler::from(&dependencies));
        membership_reconciler.set_observer(Arc::downgrade(&reconciliation_observer));

        let server_event_handler_queue = ServerEventHandlerQueue::new();
        server_event_handler_queue.set_handlers(vec![
            Box::new(ConnectionEventHandler::from(&dependencies)),
            Box::new(RosterEventHandler::from(&dependencies)),
            Box::new(ArchiveEventHandler::from(&dependencies)),
            Box::new(InvitationsEventHandler::from(&dependencies)),
        ]);

        let inner = ProtocolProviderInner {
            chat_rooms: ChatRoomsService::from(&dependencies),
            connection: ConnectionService::from(&dependencies),
            ctx: dependencies.ctx.clone(),
            membership_reconciler: dependencies.membership_reconciler.clone(),
            server_event_handler_queue,
            _reconciliation_observer: reconciliation_observer,
        };

        ProtocolProvider {
            inner: Arc::new(inner),
        }
    }
}
