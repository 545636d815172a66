// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use jid::BareJid;

use crate::domain::connection::models::ConnectionError;
use crate::domain::membership::models::ArchiveEventKind;
use crate::domain::shared::models::RoomId;

/// Everything the directory service reports to the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    Connection(ConnectionEvent),
    Roster(RosterEvent),
    Archive(ArchiveEvent),
    Invitation(InvitationEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Connected,
    Disconnected { error: Option<ConnectionError> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RosterEvent {
    /// An item of the initial roster snapshot.
    SnapshotEntry { jid: BareJid, name: Option<String> },
    /// The initial roster snapshot was delivered completely.
    SnapshotCompleted,
    /// A live roster push adding an item.
    EntryAdded { jid: BareJid, name: Option<String> },
    /// A live roster push removing an item.
    EntryRemoved { jid: BareJid },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveEvent {
    /// A join or leave found while replaying the message archive.
    Membership {
        room_id: RoomId,
        timestamp: DateTime<Utc>,
        kind: ArchiveEventKind,
    },
    /// The archive query finished. `is_complete` is false if more pages are pending.
    QueryCompleted { is_complete: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvitationEvent {
    pub room_id: RoomId,
    pub inviter: BareJid,
    pub reason: Option<String>,
    pub password: Option<String>,
    pub raw_message: String,
    pub delay: Option<DateTime<Utc>>,
}
