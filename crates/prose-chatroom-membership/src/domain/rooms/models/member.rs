// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::BareJid;
use strum_macros::Display;

use crate::domain::shared::models::Nickname;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MemberRole {
    Moderator,
    Participant,
    Visitor,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub nickname: Nickname,
    /// The real JID of the member. Only available in non-anonymous rooms.
    pub real_jid: Option<BareJid>,
    pub role: MemberRole,
}

impl Member {
    pub fn new(nickname: impl Into<Nickname>, role: MemberRole) -> Self {
        Self {
            nickname: nickname.into(),
            real_jid: None,
            role,
        }
    }

    pub fn with_real_jid(mut self, real_jid: BareJid) -> Self {
        self.real_jid = Some(real_jid);
        self
    }
}
