// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::shared::models::RoomId;

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ChatHistoryService: Send + Sync {
    /// Marks the message history of the room as closed at `closed_at`.
    async fn close_history(&self, room_id: &RoomId, closed_at: DateTime<Utc>) -> Result<()>;
}
