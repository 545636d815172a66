// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::membership::models::ReconcilerState;
use crate::domain::shared::models::RoomId;

/// Merges roster membership, archive join/leave dates and the completion signals of both
/// into exactly one join or leave per room.
///
/// None of these methods block on the network or fail. Decided actions are handed to the
/// `MembershipActionQueue`.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait MembershipReconciler: Send + Sync {
    async fn room_seen_in_roster(&self, room_id: &RoomId);
    async fn room_absent_from_roster(&self, room_id: &RoomId);
    async fn archive_join_observed(&self, room_id: &RoomId, timestamp: DateTime<Utc>);
    async fn archive_leave_observed(&self, room_id: &RoomId, timestamp: DateTime<Utc>);
    async fn archive_query_completed(&self, is_complete: bool);
    async fn roster_processing_completed(&self);

    /// Dispatches everything that is still deferred and signals the completion of the initial
    /// reconciliation to the `ReconciliationObserver`.
    async fn flush_deferred(&self);

    fn is_initial_reconciliation_completed(&self) -> bool;

    /// Returns a copy of the current bookkeeping.
    fn state(&self) -> ReconcilerState;

    /// Records a join or leave that happened without the reconciler deciding it, e.g. one
    /// requested by the user or a capacity eviction. The next roster fact about `room_id` is
    /// compared against this instead of the reconciler's last decision.
    fn membership_changed(&self, room_id: &RoomId, is_joined: bool);

    /// Discards all bookkeeping. Called whenever a new session is established.
    fn reset(&self);
}
