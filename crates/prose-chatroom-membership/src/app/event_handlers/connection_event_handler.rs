// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::app::deps::{
    AppDependencies, DynAppContext, DynClientEventDispatcher, DynInvitationQueue,
    DynMembershipActionQueue, DynMembershipReconciler, DynRoomRegistry, DynRosterUpdateBuffer,
};
use crate::app::event_handlers::{ConnectionEvent, ServerEvent, ServerEventHandler};
use crate::domain::connection::models::ConnectionError;
use crate::{ClientEvent, ConnectionEvent as ClientConnectionEvent};

pub struct ConnectionEventHandler {
    action_queue: DynMembershipActionQueue,
    client_event_dispatcher: DynClientEventDispatcher,
    ctx: DynAppContext,
    invitation_queue: DynInvitationQueue,
    membership_reconciler: DynMembershipReconciler,
    pending_roster_updates: DynRosterUpdateBuffer,
    room_registry: DynRoomRegistry,
}

impl From<&AppDependencies> for ConnectionEventHandler {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            action_queue: deps.action_queue.clone(),
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
            ctx: deps.ctx.clone(),
            invitation_queue: deps.invitation_queue.clone(),
            membership_reconciler: deps.membership_reconciler.clone(),
            pending_roster_updates: deps.pending_roster_updates.clone(),
            room_registry: deps.room_registry.clone(),
        }
    }
}

#[async_trait]
impl ServerEventHandler for ConnectionEventHandler {
    fn name(&self) -> &'static str {
        "connection"
    }

    async fn handle_event(&self, event: ServerEvent) -> Result<Option<ServerEvent>> {
        match event {
            ServerEvent::Connection(ConnectionEvent::Disconnected { error }) => {
                self.handle_disconnect(error.clone());
                // Other handlers may want to clean up as well.
                Ok(Some(ServerEvent::Connection(ConnectionEvent::Disconnected {
                    error,
                })))
            }
            // We'll send an event from `ConnectionService::connect` once the connection
            // properties are known.
            _ => Ok(Some(event)),
        }
    }
}

impl ConnectionEventHandler {
    fn handle_disconnect(&self, error: Option<ConnectionError>) {
        info!("Connection was lost. Tearing down room sessions…");

        self.action_queue.cancel_all();
        self.room_registry.move_to_backup();
        self.membership_reconciler.reset();
        self.invitation_queue.reset();
        self.pending_roster_updates.reset();
        self.ctx.reset_connection_properties();

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConnectionStatusChanged {
                event: ClientConnectionEvent::Disconnect { error },
            });
    }
}
