// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::domain::rooms::repos::RoomConfigRepository;
use crate::domain::shared::models::RoomId;

/// Keeps the configuration of the rooms the account takes part in for the lifetime of the
/// process. Hosts that persist room configuration provide their own repository.
pub struct InMemoryRoomConfigRepository {
    rooms: RwLock<IndexMap<RoomId, Option<String>>>,
}

impl InMemoryRoomConfigRepository {
    pub fn new() -> Self {
        Self {
            rooms: Default::default(),
        }
    }
}

impl Default for InMemoryRoomConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomConfigRepository for InMemoryRoomConfigRepository {
    async fn get_all(&self) -> Result<Vec<RoomId>> {
        Ok(self.rooms.read().keys().cloned().collect())
    }

    async fn get_password(&self, room_id: &RoomId) -> Result<Option<String>> {
        Ok(self.rooms.read().get(room_id).cloned().flatten())
    }

    async fn save(&self, room_id: &RoomId, password: Option<String>) -> Result<()> {
        self.rooms.write().insert(room_id.clone(), password);
        Ok(())
    }

    async fn delete(&self, room_id: &RoomId) -> Result<()> {
        self.rooms.write().shift_remove(room_id);
        Ok(())
    }
}
