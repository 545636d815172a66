// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::rooms::services::ChatHistoryService;
use crate::domain::shared::models::RoomId;

#[derive(Default)]
pub struct InMemoryChatHistoryService {
    closed_at: RwLock<HashMap<RoomId, DateTime<Utc>>>,
}

impl InMemoryChatHistoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The date at which the history of `room_id` was closed last.
    pub fn closed_at(&self, room_id: &RoomId) -> Option<DateTime<Utc>> {
        self.closed_at.read().get(room_id).cloned()
    }
}

#[async_trait]
impl ChatHistoryService for InMemoryChatHistoryService {
    async fn close_history(&self, room_id: &RoomId, closed_at: DateTime<Utc>) -> Result<()> {
        self.closed_at.write().insert(room_id.clone(), closed_at);
        Ok(())
    }
}
