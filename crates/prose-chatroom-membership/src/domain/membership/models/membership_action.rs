// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use strum_macros::Display;

use crate::domain::shared::models::RoomId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArchiveEventKind {
    Join,
    Leave,
}

/// A join or leave decided by the reconciler, executed by the sequential action queue.
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipAction {
    Join {
        room_id: RoomId,
        /// When the join happened according to the message archive.
        timestamp: Option<DateTime<Utc>>,
        password: Option<String>,
    },
    Leave {
        room_id: RoomId,
        timestamp: Option<DateTime<Utc>>,
    },
}

impl MembershipAction {
    pub fn join(room_id: RoomId, timestamp: Option<DateTime<Utc>>) -> Self {
        MembershipAction::Join {
            room_id,
            timestamp,
            password: None,
        }
    }

    pub fn leave(room_id: RoomId, timestamp: Option<DateTime<Utc>>) -> Self {
        MembershipAction::Leave { room_id, timestamp }
    }

    pub fn with_password(self, password: Option<String>) -> Self {
        match self {
            MembershipAction::Join {
                room_id, timestamp, ..
            } => MembershipAction::Join {
                room_id,
                timestamp,
                password,
            },
            leave @ MembershipAction::Leave { .. } => leave,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        match self {
            MembershipAction::Join { room_id, .. } | MembershipAction::Leave { room_id, .. } => {
                room_id
            }
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            MembershipAction::Join { timestamp, .. } | MembershipAction::Leave { timestamp, .. } => {
                *timestamp
            }
        }
    }

    pub fn is_join(&self) -> bool {
        matches!(self, MembershipAction::Join { .. })
    }
}

impl Display for MembershipAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (kind, room_id) = match self {
            MembershipAction::Join { room_id, .. } => ("join", room_id),
            MembershipAction::Leave { room_id, .. } => ("leave", room_id),
        };
        match self.timestamp() {
            Some(timestamp) => write!(f, "{kind} {room_id} @ {}", timestamp.to_rfc3339()),
            None => write!(f, "{kind} {room_id}"),
        }
    }
}
