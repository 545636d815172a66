// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use membership_action_queue::{JoinRequestResult, MembershipActionQueue};
pub use membership_reconciler::MembershipReconciler;
pub use reconciliation_observer::ReconciliationObserver;

pub mod impls;
mod membership_action_queue;
mod membership_reconciler;
mod reconciliation_observer;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::membership_action_queue::MockMembershipActionQueue;
    pub use super::membership_reconciler::MockMembershipReconciler;
    pub use super::reconciliation_observer::MockReconciliationObserver;
}
