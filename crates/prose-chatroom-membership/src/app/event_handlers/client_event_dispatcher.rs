// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::trace;

use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::{ClientDelegate, ClientEvent};

pub struct ClientEventDispatcher {
    delegate: Option<Box<dyn ClientDelegate>>,
}

impl ClientEventDispatcher {
    pub fn new(delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        Self { delegate }
    }
}

impl ClientEventDispatcherTrait for ClientEventDispatcher {
    fn dispatch_event(&self, event: ClientEvent) {
        let Some(ref delegate) = self.delegate else {
            return;
        };
        trace!("Dispatching {event:?}");
        delegate.handle_event(event)
    }
}
