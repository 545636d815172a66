// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::domain::rooms::models::{JoinedRoom, RoomSession};
use crate::domain::rooms::repos::RoomRegistry;
use crate::domain::shared::models::RoomId;

pub struct InMemoryRoomRegistry {
    live: RwLock<LiveRooms>,
    backup: Mutex<HashMap<RoomId, Arc<RoomSession>>>,
}

#[derive(Default)]
struct LiveRooms {
    sessions: HashMap<RoomId, Arc<RoomSession>>,
    active_room_count: usize,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        InMemoryRoomRegistry {
            live: Default::default(),
            backup: Default::default(),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveRooms {
    /// Moves the session out of `backup` into the live cache. Must be called with the live
    /// cache locked for writing.
    fn rehydrate(
        &mut self,
        room_id: &RoomId,
        backup: &Mutex<HashMap<RoomId, Arc<RoomSession>>>,
    ) -> Option<Arc<RoomSession>> {
        let session = backup.lock().remove(room_id)?;
        debug!("Restoring {room_id} from the backup cache.");
        self.sessions.insert(room_id.clone(), session.clone());
        Some(session)
    }
}

impl RoomRegistry for InMemoryRoomRegistry {
    fn get(&self, room_id: &RoomId) -> Option<Arc<RoomSession>> {
        if let Some(session) = self.live.read().sessions.get(room_id) {
            return Some(session.clone());
        }

        let mut live = self.live.write();
        // Someone might have inserted the session in the meantime.
        if let Some(session) = live.sessions.get(room_id) {
            return Some(session.clone());
        }
        live.rehydrate(room_id, &self.backup)
    }

    fn insert(&self, session: Arc<RoomSession>) -> Arc<RoomSession> {
        let mut live = self.live.write();

        if let Some(existing) = live.sessions.get(&session.room_id) {
            return existing.clone();
        }
        if let Some(restored) = live.rehydrate(&session.room_id, &self.backup) {
            return restored;
        }

        if session.is_joined() {
            live.active_room_count += 1;
        }
        live.sessions
            .insert(session.room_id.clone(), session.clone());
        session
    }

    fn remove(&self, room_id: &RoomId) -> Option<Arc<RoomSession>> {
        let mut live = self.live.write();
        let session = live.sessions.remove(room_id)?;
        if session.is_joined() {
            live.active_room_count = live.active_room_count.saturating_sub(1);
        }
        Some(session)
    }

    fn joined_rooms(&self) -> Vec<Arc<RoomSession>> {
        let mut rooms = self
            .live
            .read()
            .sessions
            .values()
            .filter(|session| session.is_joined())
            .cloned()
            .collect::<Vec<_>>();
        rooms.sort_by(|lhs, rhs| lhs.room_id.to_string().cmp(&rhs.room_id.to_string()));
        rooms
    }

    fn active_room_count(&self) -> usize {
        self.live.read().active_room_count
    }

    fn mark_joined(&self, room_id: &RoomId, joined_room: JoinedRoom, at: DateTime<Utc>) -> bool {
        let mut live = self.live.write();
        let Some(session) = live.sessions.get(room_id).cloned() else {
            return false;
        };
        if !session.transition_to_joined(joined_room, at) {
            return false;
        }
        live.active_room_count += 1;
        true
    }

    fn mark_left(&self, room_id: &RoomId) -> bool {
        let mut live = self.live.write();
        let Some(session) = live.sessions.get(room_id).cloned() else {
            return false;
        };
        let was_joined = session.is_joined();
        if !session.transition_to_left() {
            return false;
        }
        if was_joined {
            live.active_room_count = live.active_room_count.saturating_sub(1);
        }
        true
    }

    fn move_to_backup(&self) {
        let mut live = self.live.write();
        let sessions = std::mem::take(&mut live.sessions);
        live.active_room_count = 0;

        debug!("Moving {} sessions to the backup cache.", sessions.len());

        let mut backup = self.backup.lock();
        for (room_id, session) in sessions {
            session.transition_to_left();
            backup.insert(room_id, session);
        }
    }

    fn clear_backup(&self) {
        self.backup.lock().clear()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;

    use crate::domain::rooms::models::RoomLifecycle;

    use super::*;

    fn room_id(s: &str) -> RoomId {
        RoomId::from_str(s).unwrap()
    }

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_counts_joined_rooms() {
        let registry = InMemoryRoomRegistry::new();
        let a = room_id("a@muc.prose.org");
        let b = room_id("b@muc.prose.org");

        registry.insert(Arc::new(RoomSession::discovered(a.clone(), None)));
        registry.insert(Arc::new(RoomSession::discovered(b.clone(), None)));
        assert_eq!(registry.active_room_count(), 0);

        assert!(registry.mark_joined(&a, JoinedRoom::default(), date()));
        assert!(registry.mark_joined(&b, JoinedRoom::default(), date()));
        assert!(!registry.mark_joined(&b, JoinedRoom::default(), date()));
        assert_eq!(registry.active_room_count(), 2);

        assert!(registry.mark_left(&a));
        assert!(!registry.mark_left(&a));
        assert_eq!(registry.active_room_count(), 1);

        registry.remove(&b);
        assert_eq!(registry.active_room_count(), 0);
        assert!(registry.joined_rooms().is_empty());
    }

    #[test]
    fn test_insert_keeps_existing_session() {
        let registry = InMemoryRoomRegistry::new();
        let a = room_id("a@muc.prose.org");

        let first = registry.insert(Arc::new(RoomSession::discovered(
            a.clone(),
            Some("First".to_string()),
        )));
        let second = registry.insert(Arc::new(RoomSession::discovered(
            a.clone(),
            Some("Second".to_string()),
        )));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.name(), Some("First".to_string()));
    }

    #[test]
    fn test_rehydrates_sessions_from_backup() {
        let registry = InMemoryRoomRegistry::new();
        let a = room_id("a@muc.prose.org");

        let session = registry.insert(Arc::new(RoomSession::discovered(a.clone(), None)));
        registry.mark_joined(&a, JoinedRoom::default(), date());

        registry.move_to_backup();
        assert_eq!(registry.active_room_count(), 0);
        assert_eq!(session.lifecycle(), RoomLifecycle::Left);
        assert!(registry.joined_rooms().is_empty());

        let restored = registry.get(&a).unwrap();
        assert!(Arc::ptr_eq(&session, &restored));

        registry.move_to_backup();
        registry.clear_backup();
        assert!(registry.get(&a).is_none());
    }
}
