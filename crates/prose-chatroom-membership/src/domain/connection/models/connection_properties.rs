// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::BareJid;

use crate::domain::shared::models::Nickname;

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionProperties {
    pub connected_jid: BareJid,
    /// The nickname used when entering chat rooms.
    pub nickname: Nickname,
    /// The MUC service (XEP-0045) advertised by the server, if any.
    pub muc_service: Option<BareJid>,
}
