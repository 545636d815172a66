// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use invitation_queue::{InvitationQueue, InvitationQueueDependencies};

mod invitation_queue;
