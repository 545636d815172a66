// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::VecDeque;

use parking_lot::Mutex;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BufferPhase {
    Buffering,
    Draining,
    Passthrough,
}

/// Holds back items that arrive while the initial roster is still being processed.
///
/// `Buffering ──▶ Draining ──▶ Passthrough`
///
/// Items offered while buffering or draining are appended to the queue and handed out in
/// receipt order by `next_for_drain`. Once the queue ran empty during draining the buffer
/// switches to passthrough and `offer` hands every item straight back to the caller. Phase
/// and queue share one lock so that no item can slip in between the last drained item and
/// the switch to passthrough.
pub struct StartupBuffer<T> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    phase: BufferPhase,
    items: VecDeque<T>,
}

impl<T> StartupBuffer<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                phase: BufferPhase::Buffering,
                items: VecDeque::new(),
            }),
        }
    }

    pub fn phase(&self) -> BufferPhase {
        self.inner.lock().phase
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queues `item` unless the buffer is in passthrough, in which case the item is returned
    /// and should be processed right away.
    pub fn offer(&self, item: T) -> Option<T> {
        let mut inner = self.inner.lock();
        match inner.phase {
            BufferPhase::Passthrough => Some(item),
            BufferPhase::Buffering | BufferPhase::Draining => {
                inner.items.push_back(item);
                None
            }
        }
    }

    /// Switches from buffering to draining. Returns false if draining has begun already, in
    /// which case the caller must not drain.
    pub fn begin_draining(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.phase != BufferPhase::Buffering {
            return false;
        }
        inner.phase = BufferPhase::Draining;
        true
    }

    /// Pops the oldest queued item. When the queue is empty the buffer switches to
    /// passthrough and `None` is returned.
    pub fn next_for_drain(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        if inner.phase != BufferPhase::Draining {
            return None;
        }
        let item = inner.items.pop_front();
        if item.is_none() {
            inner.phase = BufferPhase::Passthrough;
        }
        item
    }

    /// Drops all queued items and starts buffering again.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.phase = BufferPhase::Buffering;
        inner.items.clear();
    }
}

impl<T> Default for StartupBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_until_drained() {
        let buffer = StartupBuffer::new();

        assert_eq!(buffer.offer(1), None);
        assert_eq!(buffer.offer(2), None);
        assert_eq!(buffer.next_for_drain(), None);
        assert_eq!(buffer.phase(), BufferPhase::Buffering);

        assert!(buffer.begin_draining());
        assert!(!buffer.begin_draining());
        assert_eq!(buffer.next_for_drain(), Some(1));

        // Items arriving while draining go to the back of the queue…
        assert_eq!(buffer.offer(3), None);
        assert_eq!(buffer.next_for_drain(), Some(2));
        assert_eq!(buffer.next_for_drain(), Some(3));
        assert_eq!(buffer.phase(), BufferPhase::Draining);

        assert_eq!(buffer.next_for_drain(), None);
        assert_eq!(buffer.phase(), BufferPhase::Passthrough);

        // …and are handed back once the queue ran empty.
        assert_eq!(buffer.offer(4), Some(4));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_reset() {
        let buffer = StartupBuffer::new();
        assert!(buffer.begin_draining());
        assert_eq!(buffer.next_for_drain(), None::<u32>);
        assert_eq!(buffer.phase(), BufferPhase::Passthrough);

        buffer.reset();
        assert_eq!(buffer.phase(), BufferPhase::Buffering);
        assert_eq!(buffer.offer(1), None);
        assert_eq!(buffer.len(), 1);
    }
}
