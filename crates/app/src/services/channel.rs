//! Replay-latest broadcast of the current session.
//!
//! Subscribers are called once immediately with the current value and then
//! on every change. This is not a queue: a subscriber only ever sees values
//! published while it is registered, starting with the one current at
//! subscription time.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::models::Session;

type Callback = Rc<dyn Fn(Option<&Session>)>;

/// Handle returned by [`SessionChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observer list holding the latest session value.
///
/// Callbacks run after every internal borrow is released, so a callback may
/// subscribe, unsubscribe, or publish on the same channel. A publish from
/// inside a callback supersedes the outer one: it is delivered to everyone,
/// and the outer publish stops, so no subscriber ends on a stale value.
#[derive(Default)]
pub struct SessionChannel {
    latest: RefCell<Option<Session>>,
    subscribers: RefCell<Vec<(SubscriptionId, Callback)>>,
    next_id: Cell<u64>,
    /// Bumped on every publish.
    generation: Cell<u64>,
}

impl SessionChannel {
    /// Create a channel holding `initial`.
    #[must_use]
    pub fn new(initial: Option<Session>) -> Self {
        Self {
            latest: RefCell::new(initial),
            ..Self::default()
        }
    }

    /// A copy of the latest value.
    #[must_use]
    pub fn value(&self) -> Option<Session> {
        self.latest.borrow().clone()
    }

    /// Whether a session is currently held.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.latest.borrow().is_some()
    }

    /// Register `callback`; it is invoked right away with the latest value.
    pub fn subscribe(&self, callback: impl Fn(Option<&Session>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let callback: Callback = Rc::new(callback);
        self.subscribers.borrow_mut().push((id, Rc::clone(&callback)));

        let current = self.value();
        callback(current.as_ref());
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    /// Replace the latest value and notify every subscriber.
    pub fn publish(&self, value: Option<Session>) {
        *self.latest.borrow_mut() = value.clone();
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let callbacks: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in callbacks {
            if self.generation.get() != generation {
                break;
            }
            callback(value.as_ref());
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl fmt::Debug for SessionChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionChannel")
            .field("latest", &self.latest.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}
