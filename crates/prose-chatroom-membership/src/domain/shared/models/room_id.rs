// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use jid::BareJid;

/// The canonical, server-qualified identifier of a chat room.
///
/// Room addresses compare case-insensitively, so a `RoomId` always holds the lower-cased
/// form of the JID it was created from.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RoomId(BareJid);

impl RoomId {
    pub fn into_inner(self) -> BareJid {
        self.0
    }

    /// Returns true if the room is hosted by `service`, i.e. both share the same domain.
    pub fn is_hosted_by(&self, service: &BareJid) -> bool {
        self.0.domain() == service.domain()
    }
}

fn canonicalize(jid: BareJid) -> BareJid {
    let raw = jid.to_string();
    let lowered = raw.to_lowercase();
    if lowered == raw {
        return jid;
    }
    BareJid::from_str(&lowered).unwrap_or(jid)
}

impl From<BareJid> for RoomId {
    fn from(value: BareJid) -> Self {
        RoomId(canonicalize(value))
    }
}

impl FromStr for RoomId {
    type Err = jid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RoomId(BareJid::from_str(&s.trim().to_lowercase())?))
    }
}

impl Deref for RoomId {
    type Target = BareJid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<BareJid> for RoomId {
    fn as_ref(&self) -> &BareJid {
        &self.0
    }
}

impl Debug for RoomId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoomId({})", self.0)
    }
}

impl Display for RoomId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_ids_compare_case_insensitively() {
        let lhs = RoomId::from_str("Team@Conference.Prose.org").unwrap();
        let rhs = RoomId::from_str("team@conference.prose.org").unwrap();
        assert_eq!(lhs, rhs);
        assert_eq!(lhs.to_string(), "team@conference.prose.org");
    }

    #[test]
    fn test_from_bare_jid_is_canonical() {
        let jid = BareJid::from_str("Lobby@MUC.prose.org").unwrap();
        assert_eq!(
            RoomId::from(jid),
            RoomId::from_str("lobby@muc.prose.org").unwrap()
        );
    }

    #[test]
    fn test_is_hosted_by() {
        let room_id = RoomId::from_str("lobby@muc.prose.org").unwrap();
        assert!(room_id.is_hosted_by(&BareJid::from_str("muc.prose.org").unwrap()));
        assert!(!room_id.is_hosted_by(&BareJid::from_str("prose.org").unwrap()));
    }
}
