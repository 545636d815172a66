// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::mem;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::domain::membership::models::MembershipAction;
use crate::domain::shared::models::RoomId;

/// The last known membership of a room during the current session. Either decided by the
/// reconciler or reported through `record_membership`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Joined,
    Left,
}

/// Bookkeeping of the membership reconciler.
///
/// The roster tells us which rooms we're a member of but not since when, the message archive
/// tells us when we joined or left a room but arrives asynchronously. Facts from one source are
/// parked here until the matching fact from the other source arrives (first arrival waits,
/// second arrival dispatches) or until both the roster and the archive are done, at which point
/// everything that is left is flushed.
///
/// A room is never in `join_set` and `join_dates` at the same time, the same goes for
/// `leave_set` and `leave_dates`. The collections preserve insertion order so that flushed
/// actions are dispatched in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilerState {
    pub waiting_for_archive: bool,
    pub roster_processed: bool,
    /// Rooms found in the roster awaiting their join date from the archive.
    pub join_set: IndexSet<RoomId>,
    /// Rooms removed from the roster awaiting their leave date from the archive.
    pub leave_set: IndexSet<RoomId>,
    /// Join dates from the archive awaiting confirmation by the roster.
    pub join_dates: IndexMap<RoomId, DateTime<Utc>>,
    /// Leave dates from the archive awaiting confirmation by the roster.
    pub leave_dates: IndexMap<RoomId, DateTime<Utc>>,
    dispositions: HashMap<RoomId, Disposition>,
    initial_reconciliation_completed: bool,
}

impl Default for ReconcilerState {
    fn default() -> Self {
        Self {
            waiting_for_archive: true,
            roster_processed: false,
            join_set: Default::default(),
            leave_set: Default::default(),
            join_dates: Default::default(),
            leave_dates: Default::default(),
            dispositions: Default::default(),
            initial_reconciliation_completed: false,
        }
    }
}

impl ReconcilerState {
    pub fn disposition(&self, room_id: &RoomId) -> Option<Disposition> {
        self.dispositions.get(room_id).copied()
    }

    pub fn is_initial_reconciliation_completed(&self) -> bool {
        self.initial_reconciliation_completed
    }

    pub fn has_deferred_facts(&self) -> bool {
        !(self.join_set.is_empty()
            && self.leave_set.is_empty()
            && self.join_dates.is_empty()
            && self.leave_dates.is_empty())
    }

    /// Returns to the state of a fresh connection.
    pub fn reset(&mut self) {
        *self = Default::default();
    }
}

impl ReconcilerState {
    pub fn room_seen_in_roster(&mut self, room_id: RoomId) -> Option<MembershipAction> {
        // The roster is the current state, so it supersedes an older roster removal.
        self.leave_set.shift_remove(&room_id);

        if let Some(timestamp) = self.join_dates.shift_remove(&room_id) {
            return self.dispatch_join(room_id, Some(timestamp));
        }
        if !self.waiting_for_archive {
            return self.dispatch_join(room_id, None);
        }
        self.join_set.insert(room_id);
        None
    }

    pub fn room_absent_from_roster(&mut self, room_id: RoomId) -> Option<MembershipAction> {
        self.join_set.shift_remove(&room_id);

        if let Some(timestamp) = self.leave_dates.shift_remove(&room_id) {
            return self.dispatch_leave(room_id, Some(timestamp));
        }
        if !self.waiting_for_archive {
            return self.dispatch_leave(room_id, None);
        }
        self.leave_set.insert(room_id);
        None
    }

    pub fn archive_join_observed(
        &mut self,
        room_id: RoomId,
        timestamp: DateTime<Utc>,
    ) -> Option<MembershipAction> {
        if self.join_set.shift_remove(&room_id) {
            return self.dispatch_join(room_id, Some(timestamp));
        }
        if self.discards_unconfirmed_archive_facts() {
            debug!("Ignoring unconfirmed archived join of {room_id}.");
            return None;
        }
        self.join_dates.insert(room_id, timestamp);
        None
    }

    pub fn archive_leave_observed(
        &mut self,
        room_id: RoomId,
        timestamp: DateTime<Utc>,
    ) -> Option<MembershipAction> {
        if self.leave_set.shift_remove(&room_id) {
            return self.dispatch_leave(room_id, Some(timestamp));
        }
        if self.discards_unconfirmed_archive_facts() {
            debug!("Ignoring unconfirmed archived leave of {room_id}.");
            return None;
        }
        self.leave_dates.insert(room_id, timestamp);
        None
    }

    /// Returns true if the deferred facts should be flushed now.
    pub fn archive_query_completed(&mut self, is_complete: bool) -> bool {
        self.waiting_for_archive = !is_complete;
        is_complete && self.roster_processed
    }

    /// Returns true if the deferred facts should be flushed now.
    pub fn roster_processing_completed(&mut self) -> bool {
        self.roster_processed = true;
        !self.waiting_for_archive
    }

    /// Empties all four collections and returns one action per distinct room they contained.
    ///
    /// Roster-derived entries are dispatched first and use a matching archive date if there is
    /// one. Archive dates that were never confirmed by the roster are dispatched afterwards
    /// unless the roster decided about that room already. If a room has both an unconfirmed
    /// join and leave date, the later one wins.
    pub fn flush_deferred(&mut self) -> Vec<MembershipAction> {
        let join_set = mem::take(&mut self.join_set);
        let leave_set = mem::take(&mut self.leave_set);
        let mut join_dates = mem::take(&mut self.join_dates);
        let mut leave_dates = mem::take(&mut self.leave_dates);
        let mut actions = vec![];

        for room_id in join_set {
            let timestamp = join_dates.shift_remove(&room_id);
            actions.extend(self.dispatch_join(room_id, timestamp));
        }
        for room_id in leave_set {
            let timestamp = leave_dates.shift_remove(&room_id);
            actions.extend(self.dispatch_leave(room_id, timestamp));
        }

        for (room_id, joined_at) in join_dates {
            let left_at = leave_dates.shift_remove(&room_id);
            if self.dispositions.contains_key(&room_id) {
                continue;
            }
            match left_at {
                Some(left_at) if left_at > joined_at => {
                    actions.extend(self.dispatch_leave(room_id, Some(left_at)))
                }
                _ => actions.extend(self.dispatch_join(room_id, Some(joined_at))),
            }
        }
        for (room_id, left_at) in leave_dates {
            if self.dispositions.contains_key(&room_id) {
                continue;
            }
            actions.extend(self.dispatch_leave(room_id, Some(left_at)));
        }

        actions
    }

    /// Marks the initial reconciliation as completed. Returns false if it was completed before.
    pub fn complete_initial_reconciliation(&mut self) -> bool {
        !mem::replace(&mut self.initial_reconciliation_completed, true)
    }

    /// Records a membership change that was not decided here, so that the next roster fact
    /// about `room_id` is compared against it instead of against an outdated decision.
    pub fn record_membership(&mut self, room_id: RoomId, is_joined: bool) {
        let disposition = if is_joined {
            Disposition::Joined
        } else {
            Disposition::Left
        };
        self.dispositions.insert(room_id, disposition);
    }
}

impl ReconcilerState {
    /// Archive facts arriving after the initial reconciliation have no snapshot left to
    /// confirm them.
    fn discards_unconfirmed_archive_facts(&self) -> bool {
        self.initial_reconciliation_completed && !self.waiting_for_archive
    }

    fn dispatch_join(
        &mut self,
        room_id: RoomId,
        timestamp: Option<DateTime<Utc>>,
    ) -> Option<MembershipAction> {
        if self.dispositions.insert(room_id.clone(), Disposition::Joined)
            == Some(Disposition::Joined)
        {
            return None;
        }
        Some(MembershipAction::join(room_id, timestamp))
    }

    fn dispatch_leave(
        &mut self,
        room_id: RoomId,
        timestamp: Option<DateTime<Utc>>,
    ) -> Option<MembershipAction> {
        if self.dispositions.insert(room_id.clone(), Disposition::Left) == Some(Disposition::Left) {
            return None;
        }
        Some(MembershipAction::leave(room_id, timestamp))
    }
}
