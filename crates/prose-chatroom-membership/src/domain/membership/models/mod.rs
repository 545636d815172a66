// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use membership_action::{ArchiveEventKind, MembershipAction};
pub use reconciler_state::{Disposition, ReconcilerState};
pub use roster_update::RosterUpdate;

mod membership_action;
mod reconciler_state;
mod roster_update;
