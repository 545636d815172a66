// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::{Arc, OnceLock, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::app::deps::{
    DynAppContext, DynChatHistoryService, DynClientEventDispatcher, DynDirectoryService,
    DynRoomActivityRanking, DynRoomConfigRepository, DynRoomRegistry, DynTimeProvider,
};
use crate::domain::membership::services::MembershipReconciler;
use crate::domain::rooms::models::{RoomError, RoomSession};
use crate::domain::shared::models::RoomId;
use crate::ClientEvent;

use super::super::RoomMembershipService as RoomMembershipServiceTrait;

pub struct RoomMembershipServiceDependencies {
    pub chat_history_service: DynChatHistoryService,
    pub client_event_dispatcher: DynClientEventDispatcher,
    pub ctx: DynAppContext,
    pub directory_service: DynDirectoryService,
    pub room_activity_ranking: DynRoomActivityRanking,
    pub room_config_repo: DynRoomConfigRepository,
    pub room_registry: DynRoomRegistry,
    pub time_provider: DynTimeProvider,
}

pub struct RoomMembershipService {
    chat_history_service: DynChatHistoryService,
    client_event_dispatcher: DynClientEventDispatcher,
    ctx: DynAppContext,
    directory_service: DynDirectoryService,
    membership_reconciler: OnceLock<Weak<dyn MembershipReconciler>>,
    room_activity_ranking: DynRoomActivityRanking,
    room_config_repo: DynRoomConfigRepository,
    room_registry: DynRoomRegistry,
    time_provider: DynTimeProvider,
}

impl From<RoomMembershipServiceDependencies> for RoomMembershipService {
    fn from(deps: RoomMembershipServiceDependencies) -> Self {
        Self {
            chat_history_service: deps.chat_history_service,
            client_event_dispatcher: deps.client_event_dispatcher,
            ctx: deps.ctx,
            directory_service: deps.directory_service,
            membership_reconciler: Default::default(),
            room_activity_ranking: deps.room_activity_ranking,
            room_config_repo: deps.room_config_repo,
            room_registry: deps.room_registry,
            time_provider: deps.time_provider,
        }
    }
}

impl RoomMembershipService {
    /// Sets the reconciler that is told about capacity evictions. Held weakly since the
    /// reconciler depends on this service through its action queue.
    pub fn set_membership_reconciler(&self, reconciler: Weak<dyn MembershipReconciler>) {
        if self.membership_reconciler.set(reconciler).is_err() {
            debug!("MembershipReconciler was set already.");
        }
    }
}

#[async_trait]
impl RoomMembershipServiceTrait for RoomMembershipService {
    async fn find_room(&self, room_id: &RoomId) -> Option<Arc<RoomSession>> {
        if let Some(session) = self.room_registry.get(room_id) {
            return Some(session);
        }

        match self.directory_service.discover_room(room_id).await {
            Ok(Some(info)) => Some(
                self.room_registry
                    .insert(Arc::new(RoomSession::discovered(info.room_id, info.name))),
            ),
            Ok(None) => None,
            Err(err) => {
                warn!("Failed to discover room {room_id}. Reason: {}", err.to_string());
                None
            }
        }
    }

    #[tracing::instrument(skip(self, password))]
    async fn join_room(
        &self,
        room_id: &RoomId,
        password: Option<String>,
        history_since: Option<DateTime<Utc>>,
    ) -> Result<Arc<RoomSession>, RoomError> {
        if !self.directory_service.is_connected() {
            return Err(RoomError::NotConnected);
        }
        let nickname = self.ctx.nickname().map_err(|_| RoomError::NotConnected)?;

        let session = match self.find_room(room_id).await {
            Some(session) => session,
            None => self
                .room_registry
                .insert(Arc::new(RoomSession::discovered(room_id.clone(), None))),
        };

        if session.is_joined() {
            return Ok(session);
        }

        let password = match password {
            Some(password) => Some(password),
            None => self
                .room_config_repo
                .get_password(room_id)
                .await
                .unwrap_or_else(|err| {
                    warn!("Failed to read saved password for {room_id}. Reason: {err}");
                    None
                }),
        };

        let joined_room = self
            .directory_service
            .join_room(room_id, &nickname, password.clone(), history_since)
            .await?;

        if self
            .room_registry
            .mark_joined(room_id, joined_room, self.time_provider.now())
        {
            info!("Joined room {room_id}.");
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::RoomJoined {
                    room_id: room_id.clone(),
                });
        }

        if let Err(err) = self.room_config_repo.save(room_id, password).await {
            error!("Failed to save configuration of room {room_id}. Reason: {err}");
        }

        self.enforce_capacity().await;

        Ok(session)
    }

    #[tracing::instrument(skip(self))]
    async fn leave_room(&self, room_id: &RoomId, left_at: Option<DateTime<Utc>>) {
        let left_at = left_at.unwrap_or_else(|| self.time_provider.now());
        let session = self.room_registry.get(room_id);
        let is_joined = session
            .as_ref()
            .map(|session| session.is_joined())
            .unwrap_or(false);

        if is_joined && self.directory_service.is_connected() {
            let result = match self.ctx.nickname() {
                Ok(nickname) => self.directory_service.leave_room(room_id, &nickname).await,
                Err(err) => Err(RoomError::Anyhow(err)),
            };
            if let Err(err) = result {
                warn!("Server did not acknowledge leaving {room_id}. Reason: {err}");
            }
        }

        // Local bookkeeping happens no matter what the server said…
        if let Err(err) = self.room_config_repo.delete(room_id).await {
            error!("Failed to delete configuration of room {room_id}. Reason: {err}");
        }
        if let Err(err) = self
            .chat_history_service
            .close_history(room_id, left_at)
            .await
        {
            error!("Failed to close history of room {room_id}. Reason: {err}");
        }

        if let Some(session) = session {
            session.record_leave(left_at);
        }

        if self.room_registry.mark_left(room_id) {
            info!("Left room {room_id}.");
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::RoomLeft {
                    room_id: room_id.clone(),
                });
        }
    }

    async fn evict_room(&self, room_id: &RoomId, left_at: Option<DateTime<Utc>>) {
        self.leave_room(room_id, left_at).await;

        let Some(session) = self.room_registry.remove(room_id) else {
            return;
        };
        session.transition_to_evicted();

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::RoomEvicted {
                room_id: room_id.clone(),
            });
    }

    async fn enforce_capacity(&self) -> Vec<RoomId> {
        let config = &self.ctx.config;
        let active_room_count = self.room_registry.active_room_count();
        let cap = config.active_room_cap();

        if active_room_count <= cap {
            return vec![];
        }

        let eviction_count = config.eviction_count(active_room_count);
        info!(
            "{active_room_count} active rooms exceed the cap of {cap}. Leaving the {eviction_count} least active rooms…"
        );

        let candidates = self
            .room_registry
            .joined_rooms()
            .into_iter()
            .map(|session| session.room_id.clone())
            .collect::<Vec<_>>();

        let rooms_to_evict = self
            .room_activity_ranking
            .least_active_rooms(candidates)
            .into_iter()
            .take(eviction_count)
            .collect::<Vec<_>>();

        let reconciler = self.membership_reconciler.get().and_then(Weak::upgrade);
        for room_id in &rooms_to_evict {
            self.evict_room(room_id, None).await;
            if let Some(reconciler) = &reconciler {
                reconciler.membership_changed(room_id, false);
            }
        }

        rooms_to_evict
    }
}
