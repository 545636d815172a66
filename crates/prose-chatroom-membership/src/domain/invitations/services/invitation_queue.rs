// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::invitations::models::InvitationRecord;
use crate::domain::shared::models::BufferPhase;

/// Holds back invitations until the rooms from the initial roster have been dealt with.
#[cfg_attr(feature = "test", mockall::automock)]
pub trait InvitationQueue: Send + Sync {
    /// Queues the invitation while buffering or draining, handles it right away otherwise.
    fn handle_invitation(&self, invitation: InvitationRecord);

    /// Handles all queued invitations in receipt order and switches to passthrough.
    fn drain(&self);

    fn phase(&self) -> BufferPhase;

    /// Drops all queued invitations and starts buffering again.
    fn reset(&self);
}
