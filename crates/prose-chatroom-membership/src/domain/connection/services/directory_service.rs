// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jid::BareJid;

use crate::domain::connection::models::{ConnectionError, ConnectionProperties};
use crate::domain::rooms::models::{JoinedRoom, RoomError, RoomInfo};
use crate::domain::shared::models::{Nickname, RoomId};

/// The session with the XMPP server as seen by the membership engine.
///
/// Roster, archive and invitation traffic is not pulled through this trait but pushed into
/// the provider as `ServerEvent`s by whoever owns the underlying stream.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait DirectoryService: Send + Sync {
    async fn connect(
        &self,
        account: &BareJid,
        password: &str,
    ) -> Result<ConnectionProperties, ConnectionError>;
    async fn disconnect(&self);
    fn is_connected(&self) -> bool;

    /// Looks up `room_id` on the server. Returns `Ok(None)` if the room does not exist.
    async fn discover_room(&self, room_id: &RoomId) -> Result<Option<RoomInfo>>;

    /// Enters the room. If `history_since` is set, the server is asked to replay the
    /// room's history starting at that date.
    async fn join_room(
        &self,
        room_id: &RoomId,
        nickname: &Nickname,
        password: Option<String>,
        history_since: Option<DateTime<Utc>>,
    ) -> Result<JoinedRoom, RoomError>;

    async fn leave_room(&self, room_id: &RoomId, nickname: &Nickname) -> Result<(), RoomError>;
}
