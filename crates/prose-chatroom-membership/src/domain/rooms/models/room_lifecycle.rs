// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use strum_macros::Display;

/// The lifecycle of a `RoomSession`.
///
/// ```text
/// Discovered ──▶ Joined ◀──▶ Left ──▶ Evicted
/// ```
///
/// A room we know nothing about has no session at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RoomLifecycle {
    /// The session was inserted into the registry, either by a local join attempt or by
    /// server-side discovery. Failed joins leave the session in this state.
    Discovered,
    Joined,
    Left,
    /// Terminal. The session was removed from the registry.
    Evicted,
}

impl RoomLifecycle {
    pub fn can_transition_to(&self, next: RoomLifecycle) -> bool {
        use RoomLifecycle::*;

        match (self, next) {
            (Discovered, Joined) | (Left, Joined) => true,
            (Joined, Left) | (Discovered, Left) => true,
            (Left, Evicted) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RoomLifecycle::*;

    #[test]
    fn test_transitions() {
        assert!(Discovered.can_transition_to(Joined));
        assert!(Joined.can_transition_to(Left));
        assert!(Left.can_transition_to(Joined));
        assert!(Left.can_transition_to(Evicted));

        assert!(!Joined.can_transition_to(Evicted));
        assert!(!Joined.can_transition_to(Joined));
        assert!(!Evicted.can_transition_to(Joined));
        assert!(!Evicted.can_transition_to(Left));
    }
}
