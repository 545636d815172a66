// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use anyhow::Result;
use jid::BareJid;
use parking_lot::RwLock;

use crate::domain::connection::models::ConnectionProperties;
use crate::domain::shared::models::Nickname;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// The configured maximum number of chat rooms.
    pub max_chat_rooms: usize,
    /// The share of `max_chat_rooms` that may be active before rooms are evicted.
    pub active_room_ratio: f64,
    /// The share of active rooms that is left once the cap is exceeded.
    pub eviction_ratio: f64,
    /// The delay after which a failed join is attempted again.
    pub join_retry_delay: Duration,
    /// The number of join attempts after which a room is given up on. `None` retries forever.
    pub max_join_attempts: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_chat_rooms: 200,
            active_room_ratio: 0.75,
            eviction_ratio: 0.1,
            join_retry_delay: Duration::from_secs(15),
            max_join_attempts: None,
        }
    }
}

impl AppConfig {
    pub fn active_room_cap(&self) -> usize {
        (self.max_chat_rooms as f64 * self.active_room_ratio).ceil() as usize
    }

    /// The number of rooms to leave when `active_room_count` exceeds the cap.
    pub fn eviction_count(&self, active_room_count: usize) -> usize {
        ((active_room_count as f64 * self.eviction_ratio).floor() as usize).max(1)
    }
}

pub struct AppContext {
    pub connection_properties: RwLock<Option<ConnectionProperties>>,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            connection_properties: Default::default(),
            config,
        }
    }
}

impl AppContext {
    pub fn connected_jid(&self) -> Result<BareJid> {
        self.connection_properties
            .read()
            .as_ref()
            .map(|p| p.connected_jid.clone())
            .ok_or(anyhow::anyhow!(
                "Failed to read the user's JID since the client is not connected."
            ))
    }

    pub fn nickname(&self) -> Result<Nickname> {
        self.connection_properties
            .read()
            .as_ref()
            .map(|p| p.nickname.clone())
            .ok_or(anyhow::anyhow!(
                "Failed to read the user's nickname since the client is not connected."
            ))
    }

    pub fn muc_service(&self) -> Result<BareJid> {
        self.connection_properties
            .read()
            .as_ref()
            .and_then(|p| p.muc_service.clone())
            .ok_or(anyhow::anyhow!("Server does not support MUC (XEP-0045)"))
    }
}

impl AppContext {
    pub fn set_connection_properties(&self, properties: ConnectionProperties) {
        self.connection_properties.write().replace(properties);
    }

    pub fn reset_connection_properties(&self) {
        self.connection_properties.write().take();
    }
}
