// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use tracing::info;

use crate::app::deps::{
    AppDependencies, DynClientEventDispatcher, DynInvitationQueue, DynMembershipReconciler,
    DynRoomRegistry, DynRosterUpdateBuffer,
};
use crate::app::event_handlers::apply_roster_update;
use crate::domain::membership::services::ReconciliationObserver;
use crate::ClientEvent;

/// Releases everything that was held back while the initial roster and archive were being
/// reconciled. Roster updates go first, then queued invitations.
pub struct InitialReconciliationHandler {
    client_event_dispatcher: DynClientEventDispatcher,
    invitation_queue: DynInvitationQueue,
    membership_reconciler: DynMembershipReconciler,
    pending_roster_updates: DynRosterUpdateBuffer,
    room_registry: DynRoomRegistry,
}

impl From<&AppDependencies> for InitialReconciliationHandler {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
            invitation_queue: deps.invitation_queue.clone(),
            membership_reconciler: deps.membership_reconciler.clone(),
            pending_roster_updates: deps.pending_roster_updates.clone(),
            room_registry: deps.room_registry.clone(),
        }
    }
}

#[async_trait]
impl ReconciliationObserver for InitialReconciliationHandler {
    #[tracing::instrument(skip(self))]
    async fn initial_reconciliation_completed(&self) {
        self.room_registry.clear_backup();

        if self.pending_roster_updates.begin_draining() {
            info!(
                "Replaying {} pending roster updates…",
                self.pending_roster_updates.len()
            );
            while let Some(update) = self.pending_roster_updates.next_for_drain() {
                apply_roster_update(&self.membership_reconciler, update).await
            }
        }

        self.invitation_queue.drain();

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::RosterFullyProcessed);
    }
}
