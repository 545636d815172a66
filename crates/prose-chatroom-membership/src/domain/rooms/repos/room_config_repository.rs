// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::shared::models::RoomId;

/// The locally stored configuration of every room the account takes part in.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait RoomConfigRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<RoomId>>;
    async fn get_password(&self, room_id: &RoomId) -> Result<Option<String>>;
    async fn save(&self, room_id: &RoomId, password: Option<String>) -> Result<()>;
    async fn delete(&self, room_id: &RoomId) -> Result<()>;
}
