// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use jid::BareJid;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::app::deps::{
    AppDependencies, DynAppContext, DynMembershipReconciler, DynRoomConfigRepository,
    DynRosterUpdateBuffer,
};
use crate::app::event_handlers::{ConnectionEvent, RosterEvent, ServerEvent, ServerEventHandler};
use crate::domain::membership::models::RosterUpdate;
use crate::domain::shared::models::RoomId;

/// Feeds roster facts about chat rooms into the `MembershipReconciler`.
///
/// Rooms of the initial snapshot are reported as they come in. Once the snapshot is complete,
/// every locally configured room that was not part of it is reported as absent. Live roster
/// pushes are held back until the initial reconciliation completed.
pub struct RosterEventHandler {
    ctx: DynAppContext,
    membership_reconciler: DynMembershipReconciler,
    pending_roster_updates: DynRosterUpdateBuffer,
    room_config_repo: DynRoomConfigRepository,
    rooms_in_snapshot: Mutex<HashSet<RoomId>>,
}

impl From<&AppDependencies> for RosterEventHandler {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            ctx: deps.ctx.clone(),
            membership_reconciler: deps.membership_reconciler.clone(),
            pending_roster_updates: deps.pending_roster_updates.clone(),
            room_config_repo: deps.room_config_repo.clone(),
            rooms_in_snapshot: Default::default(),
        }
    }
}

#[async_trait]
impl ServerEventHandler for RosterEventHandler {
    fn name(&self) -> &'static str {
        "roster"
    }

    async fn handle_event(&self, event: ServerEvent) -> Result<Option<ServerEvent>> {
        match event {
            ServerEvent::Roster(event) => self.handle_roster_event(event).await,
            ServerEvent::Connection(ConnectionEvent::Connected) => {
                self.rooms_in_snapshot.lock().clear();
                return Ok(Some(event));
            }
            _ => return Ok(Some(event)),
        }
        Ok(None)
    }
}

impl RosterEventHandler {
    async fn handle_roster_event(&self, event: RosterEvent) {
        match event {
            RosterEvent::SnapshotEntry { jid, .. } => {
                let Some(room_id) = self.room_id_for_roster_item(jid) else {
                    return;
                };
                self.rooms_in_snapshot.lock().insert(room_id.clone());
                self.membership_reconciler
                    .room_seen_in_roster(&room_id)
                    .await;
            }
            RosterEvent::SnapshotCompleted => self.handle_snapshot_completed().await,
            RosterEvent::EntryAdded { jid, .. } => {
                if let Some(room_id) = self.room_id_for_roster_item(jid) {
                    self.handle_roster_update(RosterUpdate::Added(room_id)).await
                }
            }
            RosterEvent::EntryRemoved { jid } => {
                if let Some(room_id) = self.room_id_for_roster_item(jid) {
                    self.handle_roster_update(RosterUpdate::Removed(room_id))
                        .await
                }
            }
        }
    }

    async fn handle_snapshot_completed(&self) {
        let seen = std::mem::take(&mut *self.rooms_in_snapshot.lock());
        // The reconciliation must not stall on a broken repository.
        let configured_rooms = self.room_config_repo.get_all().await.unwrap_or_else(|err| {
            warn!("Failed to load configured rooms. Reason: {err}");
            vec![]
        });

        let absent_rooms = configured_rooms
            .into_iter()
            .filter(|room_id| !seen.contains(room_id))
            .collect::<Vec<_>>();

        info!(
            "Roster snapshot contained {} rooms, {} configured rooms are gone.",
            seen.len(),
            absent_rooms.len()
        );

        for room_id in &absent_rooms {
            self.membership_reconciler
                .room_absent_from_roster(room_id)
                .await;
        }

        self.membership_reconciler
            .roster_processing_completed()
            .await
    }

    async fn handle_roster_update(&self, update: RosterUpdate) {
        let Some(update) = self.pending_roster_updates.offer(update) else {
            debug!("Holding back roster update until the initial reconciliation completed.");
            return;
        };
        apply_roster_update(&self.membership_reconciler, update).await
    }

    /// Roster items hosted by the MUC service are chat rooms. Everything else is a contact.
    fn room_id_for_roster_item(&self, jid: BareJid) -> Option<RoomId> {
        let muc_service = self.ctx.muc_service().ok()?;
        let room_id = RoomId::from(jid);
        room_id.is_hosted_by(&muc_service).then_some(room_id)
    }
}

pub(crate) async fn apply_roster_update(
    membership_reconciler: &DynMembershipReconciler,
    update: RosterUpdate,
) {
    match update {
        RosterUpdate::Added(room_id) => membership_reconciler.room_seen_in_roster(&room_id).await,
        RosterUpdate::Removed(room_id) => {
            membership_reconciler.room_absent_from_roster(&room_id).await
        }
    }
}
