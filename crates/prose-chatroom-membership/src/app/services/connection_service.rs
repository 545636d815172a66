// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::BareJid;
use tracing::info;

use crate::app::deps::{
    AppDependencies, DynAppContext, DynClientEventDispatcher, DynDirectoryService,
    DynInvitationQueue, DynMembershipActionQueue, DynMembershipReconciler, DynRoomRegistry,
    DynRosterUpdateBuffer,
};
use crate::client_event::ConnectionEvent;
use crate::domain::connection::models::ConnectionError;
use crate::ClientEvent;

pub struct ConnectionService {
    action_queue: DynMembershipActionQueue,
    client_event_dispatcher: DynClientEventDispatcher,
    ctx: DynAppContext,
    directory_service: DynDirectoryService,
    invitation_queue: DynInvitationQueue,
    membership_reconciler: DynMembershipReconciler,
    pending_roster_updates: DynRosterUpdateBuffer,
    room_registry: DynRoomRegistry,
}

impl From<&AppDependencies> for ConnectionService {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            action_queue: deps.action_queue.clone(),
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
            ctx: deps.ctx.clone(),
            directory_service: deps.directory_service.clone(),
            invitation_queue: deps.invitation_queue.clone(),
            membership_reconciler: deps.membership_reconciler.clone(),
            pending_roster_updates: deps.pending_roster_updates.clone(),
            room_registry: deps.room_registry.clone(),
        }
    }
}

impl ConnectionService {
    /// Establishes a new session. All reconciliation bookkeeping of a previous session is
    /// discarded before the connection attempt.
    #[tracing::instrument(skip(self, password))]
    pub async fn connect(
        &self,
        account: &BareJid,
        password: impl AsRef<str>,
    ) -> Result<(), ConnectionError> {
        self.tear_down_session();

        let properties = self
            .directory_service
            .connect(account, password.as_ref())
            .await?;

        info!(
            "Connected as {} (MUC service: {}).",
            properties.connected_jid,
            properties
                .muc_service
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "none".to_string())
        );
        self.ctx.set_connection_properties(properties);

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConnectionStatusChanged {
                event: ConnectionEvent::Connect,
            });

        Ok(())
    }

    pub async fn disconnect(&self) {
        self.directory_service.disconnect().await;
        self.tear_down_session();
        self.ctx.reset_connection_properties();

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConnectionStatusChanged {
                event: ConnectionEvent::Disconnect { error: None },
            });
    }

    fn tear_down_session(&self) {
        self.action_queue.cancel_all();
        self.room_registry.move_to_backup();
        self.membership_reconciler.reset();
        self.invitation_queue.reset();
        self.pending_roster_updates.reset();
    }
}
