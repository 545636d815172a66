// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use membership_reconciler::{MembershipReconciler, MembershipReconcilerDependencies};

mod membership_reconciler;
