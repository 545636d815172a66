// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{ClientDelegate, ClientEvent};

#[derive(Clone, Default)]
pub struct RecordingClientDelegate {
    events: Arc<Mutex<Vec<ClientEvent>>>,
}

impl RecordingClientDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_events(&self) -> Vec<ClientEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl ClientDelegate for RecordingClientDelegate {
    fn handle_event(&self, event: ClientEvent) {
        self.events.lock().push(event)
    }
}
