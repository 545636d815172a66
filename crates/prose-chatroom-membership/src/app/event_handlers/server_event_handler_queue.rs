// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::OnceLock;

use tracing::{error, warn};

use crate::app::event_handlers::{ServerEvent, ServerEventHandler};

pub struct ServerEventHandlerQueue {
    handlers: OnceLock<Vec<Box<dyn ServerEventHandler>>>,
}

impl ServerEventHandlerQueue {
    pub fn new() -> Self {
        Self {
            handlers: Default::default(),
        }
    }

    pub fn set_handlers(&self, handlers: Vec<Box<dyn ServerEventHandler>>) {
        if self.handlers.set(handlers).is_err() {
            warn!("Handlers were set already in ServerEventHandlerQueue.");
        }
    }

    /// Passes `event` down the chain of handlers until one of them consumes it. Errors are
    /// logged and end the processing of that event.
    pub async fn handle_event(&self, event: ServerEvent) {
        let mut event = event;
        let Some(handlers) = self.handlers.get() else {
            error!("Handlers were not set in ServerEventHandlerQueue.");
            return;
        };

        for handler in handlers.iter() {
            match handler.handle_event(event).await {
                Ok(None) => return,
                Ok(Some(e)) => event = e,
                Err(err) => {
                    error!(
                        "Event handler '{}' aborted with error: {}",
                        handler.name(),
                        err.to_string()
                    );
                    return;
                }
            }
        }
    }
}

impl Default for ServerEventHandlerQueue {
    fn default() -> Self {
        Self::new()
    }
}
