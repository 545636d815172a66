// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use crate::domain::membership::models::MembershipAction;
use crate::domain::rooms::models::{RoomError, RoomSession};
use crate::domain::shared::models::RoomId;

pub type JoinRequestResult = Result<Arc<RoomSession>, RoomError>;

/// Executes membership actions one at a time, in enqueue order, off the caller's task.
#[cfg_attr(feature = "test", mockall::automock)]
pub trait MembershipActionQueue: Send + Sync {
    /// Schedules `action` and returns immediately.
    fn enqueue(&self, action: MembershipAction);

    /// Schedules a join requested by the user. The result is delivered through the returned
    /// receiver, failed requests are not retried. The sender is dropped if the request gets
    /// cancelled.
    fn enqueue_join_request(
        &self,
        room_id: RoomId,
        password: Option<String>,
    ) -> oneshot::Receiver<JoinRequestResult>;

    /// Schedules a leave requested by the user. The receiver resolves once the room was left.
    fn enqueue_leave_request(
        &self,
        room_id: RoomId,
        left_at: Option<DateTime<Utc>>,
    ) -> oneshot::Receiver<()>;

    /// Drops all pending actions and scheduled retries.
    fn cancel_all(&self);
}
