//! Full-snapshot subscriptions.
//!
//! A subscriber registers a [`HabitQuery`] and receives the complete result
//! set after every committed mutation. Dropping the [`Subscription`] removes
//! the subscriber.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::HabitQuery;
use crate::error::HabitError;
use crate::habits::Habit;

/// One delivery to a subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotEvent {
    /// The full, current result set of the subscribed query.
    Snapshot(Vec<Habit>),
    /// The query failed; the subscription stays open.
    Error(String),
}

struct Subscriber {
    id: u64,
    query: HabitQuery,
    sender: Sender<SnapshotEvent>,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Registry of live subscribers for one store.
#[derive(Default)]
pub struct SnapshotHub {
    inner: Rc<RefCell<HubInner>>,
}

impl SnapshotHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `query` and deliver `initial` right away.
    pub fn subscribe(
        &self,
        query: HabitQuery,
        initial: Result<Vec<Habit>, HabitError>,
    ) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        // The receiver is alive, so this send cannot fail.
        let _ = sender.send(to_event(initial));

        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber { id, query, sender });
        tracing::debug!(subscriber = id, "subscribed");

        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
            receiver,
        }
    }

    /// Re-run each subscriber's query with `run` and deliver the result.
    ///
    /// Subscribers whose receiver is gone are pruned.
    pub fn publish<F>(&self, mut run: F)
    where
        F: FnMut(&HabitQuery) -> Result<Vec<Habit>, HabitError>,
    {
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|sub| {
            let event = to_event(run(&sub.query));
            let alive = sub.sender.send(event).is_ok();
            if !alive {
                tracing::debug!(subscriber = sub.id, "pruned disconnected subscriber");
            }
            alive
        });
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn to_event(result: Result<Vec<Habit>, HabitError>) -> SnapshotEvent {
    match result {
        Ok(habits) => SnapshotEvent::Snapshot(habits),
        Err(e) => {
            tracing::error!(error = %e, "failed to load habits for subscriber");
            SnapshotEvent::Error("Failed to load habits".to_string())
        },
    }
}

/// A live subscription. Unsubscribes on drop.
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
    receiver: Receiver<SnapshotEvent>,
}

impl Subscription {
    /// Next pending event, if any.
    #[must_use]
    pub fn try_next(&self) -> Option<SnapshotEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Drain pending events and return only the newest.
    ///
    /// Snapshots replace each other, so intermediate ones carry nothing the
    /// newest lacks.
    #[must_use]
    pub fn latest(&self) -> Option<SnapshotEvent> {
        let mut latest = None;
        while let Some(event) = self.try_next() {
            latest = Some(event);
        }
        latest
    }

    /// Stop receiving snapshots.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            if let Ok(mut inner) = hub.try_borrow_mut() {
                inner.subscribers.retain(|sub| sub.id != self.id);
                tracing::debug!(subscriber = self.id, "unsubscribed");
            }
        }
    }
}
