// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::rooms::models::{JoinedRoom, Member, MemberRole, RoomLifecycle};
use crate::domain::shared::models::{Nickname, RoomId};

/// A chat room as seen by the local account. Sessions are shared via `Arc` between the
/// registry and the UI layers, hence the interior mutability.
pub struct RoomSession {
    pub room_id: RoomId,
    inner: RwLock<RoomSessionInner>,
}

#[derive(Debug, Clone, PartialEq)]
struct RoomSessionInner {
    name: Option<String>,
    lifecycle: RoomLifecycle,
    invited_at: Option<DateTime<Utc>>,
    joined_at: Option<DateTime<Utc>>,
    left_at: Option<DateTime<Utc>>,
    members: HashMap<Nickname, Member>,
    local_role: MemberRole,
}

impl RoomSession {
    pub fn discovered(room_id: RoomId, name: Option<String>) -> Self {
        Self {
            room_id,
            inner: RwLock::new(RoomSessionInner {
                name,
                lifecycle: RoomLifecycle::Discovered,
                invited_at: None,
                joined_at: None,
                left_at: None,
                members: Default::default(),
                local_role: MemberRole::None,
            }),
        }
    }
}

impl RoomSession {
    pub fn name(&self) -> Option<String> {
        self.inner.read().name.clone()
    }

    pub fn lifecycle(&self) -> RoomLifecycle {
        self.inner.read().lifecycle
    }

    pub fn is_joined(&self) -> bool {
        self.lifecycle() == RoomLifecycle::Joined
    }

    pub fn invited_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().invited_at
    }

    pub fn joined_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().joined_at
    }

    pub fn left_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().left_at
    }

    pub fn local_role(&self) -> MemberRole {
        self.inner.read().local_role
    }

    /// Returns the members of the room sorted by nickname.
    pub fn members(&self) -> Vec<Member> {
        let mut members = self
            .inner
            .read()
            .members
            .values()
            .cloned()
            .collect::<Vec<_>>();
        members.sort_by(|lhs, rhs| lhs.nickname.cmp(&rhs.nickname));
        members
    }

    pub fn member(&self, nickname: &Nickname) -> Option<Member> {
        self.inner.read().members.get(nickname).cloned()
    }
}

impl RoomSession {
    pub fn set_invited_at(&self, invited_at: Option<DateTime<Utc>>) {
        self.inner.write().invited_at = invited_at;
    }

    /// Records the invitation date. Returns false for re-delivered invitations, i.e. if an
    /// invitation was recorded before and the room has not been left since, or if the
    /// invitation predates the last leave.
    pub fn mark_invited(&self, invited_at: DateTime<Utc>) -> bool {
        let mut inner = self.inner.write();
        if let Some(previous_invitation) = inner.invited_at {
            let is_new = matches!(
                inner.left_at,
                Some(left_at) if left_at >= previous_invitation && invited_at > left_at
            );
            if !is_new {
                return false;
            }
        }
        inner.invited_at = Some(invited_at);
        true
    }

    /// Remembers when the user left the room, so that later invitations count as new ones.
    pub fn record_leave(&self, left_at: DateTime<Utc>) {
        self.inner.write().left_at = Some(left_at);
    }

    pub fn set_member(&self, member: Member) {
        self.inner
            .write()
            .members
            .insert(member.nickname.clone(), member);
    }

    pub fn remove_member(&self, nickname: &Nickname) -> Option<Member> {
        self.inner.write().members.remove(nickname)
    }

    /// Moves the session into `RoomLifecycle::Joined`. Returns false if the session was
    /// joined already or has been evicted.
    pub fn transition_to_joined(&self, joined_room: JoinedRoom, joined_at: DateTime<Utc>) -> bool {
        let mut inner = self.inner.write();
        if !inner.lifecycle.can_transition_to(RoomLifecycle::Joined) {
            return false;
        }
        inner.lifecycle = RoomLifecycle::Joined;
        inner.joined_at = Some(joined_at);
        inner.local_role = joined_room.role;
        inner.members = joined_room
            .members
            .into_iter()
            .map(|member| (member.nickname.clone(), member))
            .collect();
        true
    }

    /// Moves the session into `RoomLifecycle::Left` and forgets its members. Returns false if
    /// the session was not in a state that can be left.
    pub fn transition_to_left(&self) -> bool {
        let mut inner = self.inner.write();
        if !inner.lifecycle.can_transition_to(RoomLifecycle::Left) {
            return false;
        }
        inner.lifecycle = RoomLifecycle::Left;
        inner.local_role = MemberRole::None;
        inner.members.clear();
        true
    }

    pub fn transition_to_evicted(&self) -> bool {
        let mut inner = self.inner.write();
        if !inner.lifecycle.can_transition_to(RoomLifecycle::Evicted) {
            return false;
        }
        inner.lifecycle = RoomLifecycle::Evicted;
        true
    }
}

impl Debug for RoomSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("RoomSession")
            .field("room_id", &self.room_id)
            .field("name", &inner.name)
            .field("lifecycle", &inner.lifecycle)
            .field("invited_at", &inner.invited_at)
            .field("left_at", &inner.left_at)
            .field("members", &inner.members.len())
            .field("local_role", &inner.local_role)
            .finish()
    }
}

impl PartialEq for RoomSession {
    fn eq(&self, other: &Self) -> bool {
        self.room_id == other.room_id && *self.inner.read() == *other.inner.read()
    }
}
