// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

pub use archive_event_handler::ArchiveEventHandler;
pub use client_event_dispatcher::ClientEventDispatcher;
pub use connection_event_handler::ConnectionEventHandler;
pub use invitations_event_handler::InvitationsEventHandler;
pub(crate) use roster_event_handler::apply_roster_update;
pub use roster_event_handler::RosterEventHandler;
pub use server_event::*;
pub use server_event_handler_queue::ServerEventHandlerQueue;

use crate::ClientEvent;

mod archive_event_handler;
mod client_event_dispatcher;
mod connection_event_handler;
mod invitations_event_handler;
mod roster_event_handler;
mod server_event;
mod server_event_handler_queue;

/// `ServerEventHandler` is a trait representing a handler for events coming from the server.
///
/// If the handler returns `None`, the event has been consumed and no further processing should
/// be done. If it returns `Some(event)`, the event is passed on to the next handler.
#[async_trait]
pub trait ServerEventHandler: Send + Sync {
    fn name(&self) -> &'static str;
    async fn handle_event(&self, event: ServerEvent) -> Result<Option<ServerEvent>>;
}

#[cfg_attr(feature = "test", mockall::automock)]
pub trait ClientEventDispatcherTrait: Send + Sync {
    fn dispatch_event(&self, event: ClientEvent);
}
