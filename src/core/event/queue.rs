//=========================================================================
// Event Queue
//=========================================================================
//
// Ordered, single-consumer queue bridging asynchronous producers (input
// dispatch, OS lifecycle callbacks) to the synchronous run-loop.
//
// Architecture:
//   EventSender<T> (any thread) ──push()──> channel ──poll()──> run-loop
//
// Backed by an unbounded crossbeam channel: `push` never blocks the
// producer and `poll` never blocks the consumer. Strict arrival order, no
// priorities, no coalescing.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::trace;

//=== EventQueue ==========================================================

/// FIFO queue polled by the run-loop.
pub struct EventQueue<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Enqueues `event` at the tail.
    pub fn push(&self, event: T) {
        // Both ends live in `self`, so the channel cannot be disconnected.
        let _ = self.sender.send(event);
    }

    /// Dequeues the head, or returns `None` when the queue is empty.
    pub fn poll(&self) -> Option<T> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Returns a producer handle that can be moved to other threads.
    pub fn sender(&self) -> EventSender<T> {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Discards every pending event, returning how many were dropped.
    pub fn clear(&self) -> usize {
        self.receiver.try_iter().count()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=== EventSender =========================================================

/// Producer side of an [`EventQueue`].
pub struct EventSender<T> {
    sender: Sender<T>,
}

impl<T> EventSender<T> {
    /// Enqueues `event`; returns `false` if the queue no longer exists.
    pub fn push(&self, event: T) -> bool {
        if self.sender.send(event).is_err() {
            trace!("Event queue dropped, discarding event");
            return false;
        }
        true
    }
}

impl<T> Clone for EventSender<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
