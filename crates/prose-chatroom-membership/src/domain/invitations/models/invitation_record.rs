// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use jid::BareJid;

use crate::domain::shared::models::RoomId;

/// A mediated or direct invitation into a chat room.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitationRecord {
    pub room_id: RoomId,
    pub inviter: BareJid,
    pub reason: Option<String>,
    pub password: Option<String>,
    /// The raw message stanza that carried the invitation.
    pub raw_message: String,
    /// The delayed-delivery (XEP-0203) stamp, if the invitation was replayed from history.
    pub delay: Option<DateTime<Utc>>,
    pub received_at: DateTime<Utc>,
}

impl InvitationRecord {
    /// An invitation carrying a delay stamp was sent while we were offline.
    pub fn is_historical(&self) -> bool {
        self.delay.is_some()
    }

    /// The delay stamp for historical invitations, the time of receipt otherwise. Stamps from
    /// the future are clamped to the time of receipt.
    pub fn effective_timestamp(&self) -> DateTime<Utc> {
        match self.delay {
            Some(delay) => delay.min(self.received_at),
            None => self.received_at,
        }
    }
}
