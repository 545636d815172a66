// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::{OnceLock, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::app::deps::DynMembershipActionQueue;
use crate::domain::membership::models::{MembershipAction, ReconcilerState};
use crate::domain::membership::services::ReconciliationObserver;
use crate::domain::shared::models::RoomId;

use super::super::MembershipReconciler as MembershipReconcilerTrait;

pub struct MembershipReconcilerDependencies {
    pub action_queue: DynMembershipActionQueue,
}

pub struct MembershipReconciler {
    action_queue: DynMembershipActionQueue,
    observer: OnceLock<Weak<dyn ReconciliationObserver>>,
    state: Mutex<ReconcilerState>,
}

impl From<MembershipReconcilerDependencies> for MembershipReconciler {
    fn from(deps: MembershipReconcilerDependencies) -> Self {
        Self {
            action_queue: deps.action_queue,
            observer: Default::default(),
            state: Default::default(),
        }
    }
}

impl MembershipReconciler {
    /// Sets the observer that is notified when the initial reconciliation completed. The
    /// observer is held weakly since it usually depends on the reconciler itself.
    pub fn set_observer(&self, observer: Weak<dyn ReconciliationObserver>) {
        if self.observer.set(observer).is_err() {
            debug!("ReconciliationObserver was set already.");
        }
    }

    /// Runs `block` under the state lock and enqueues the action it decided on, if any.
    /// Enqueueing under the lock keeps the queue order in line with the order of decisions.
    fn apply(&self, block: impl FnOnce(&mut ReconcilerState) -> Option<MembershipAction>) {
        let mut state = self.state.lock();
        if let Some(action) = block(&mut state) {
            debug!("Scheduling {action}");
            self.action_queue.enqueue(action);
        }
    }
}

#[async_trait]
impl MembershipReconcilerTrait for MembershipReconciler {
    async fn room_seen_in_roster(&self, room_id: &RoomId) {
        self.apply(|state| state.room_seen_in_roster(room_id.clone()))
    }

    async fn room_absent_from_roster(&self, room_id: &RoomId) {
        self.apply(|state| state.room_absent_from_roster(room_id.clone()))
    }

    async fn archive_join_observed(&self, room_id: &RoomId, timestamp: DateTime<Utc>) {
        self.apply(|state| state.archive_join_observed(room_id.clone(), timestamp))
    }

    async fn archive_leave_observed(&self, room_id: &RoomId, timestamp: DateTime<Utc>) {
        self.apply(|state| state.archive_leave_observed(room_id.clone(), timestamp))
    }

    async fn archive_query_completed(&self, is_complete: bool) {
        let should_flush = self.state.lock().archive_query_completed(is_complete);
        if should_flush {
            self.flush_deferred().await
        }
    }

    async fn roster_processing_completed(&self) {
        let should_flush = self.state.lock().roster_processing_completed();
        if should_flush {
            self.flush_deferred().await
        }
    }

    #[tracing::instrument(skip(self))]
    async fn flush_deferred(&self) {
        let completed_now = {
            let mut state = self.state.lock();
            let actions = state.flush_deferred();
            info!("Flushing {} deferred membership actions…", actions.len());
            for action in actions {
                debug!("Scheduling {action}");
                self.action_queue.enqueue(action);
            }
            state.complete_initial_reconciliation()
        };

        if !completed_now {
            return;
        }

        let Some(observer) = self.observer.get().and_then(Weak::upgrade) else {
            return;
        };
        observer.initial_reconciliation_completed().await;
    }

    fn is_initial_reconciliation_completed(&self) -> bool {
        self.state.lock().is_initial_reconciliation_completed()
    }

    fn state(&self) -> ReconcilerState {
        self.state.lock().clone()
    }

    fn membership_changed(&self, room_id: &RoomId, is_joined: bool) {
        debug!("Membership of {room_id} changed outside of reconciliation. Joined: {is_joined}");
        self.state
            .lock()
            .record_membership(room_id.clone(), is_joined)
    }

    fn reset(&self) {
        self.state.lock().reset()
    }
}
