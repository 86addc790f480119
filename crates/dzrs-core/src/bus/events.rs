//! Synchronous publish/subscribe channel keyed by event name
//!
//! Every published event is delivered on the publishing thread, in
//! subscription order, to the subscribers registered for that name when
//! the dispatch started. Callbacks may subscribe, unsubscribe or publish
//! themselves; such changes apply to later dispatches only.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<P> = Arc<dyn Fn(&P) + Send + Sync>;

struct Subscriber<P> {
    id: SubscriptionId,
    callback: Callback<P>,
}

struct Registry<P> {
    next_id: u64,
    by_name: HashMap<String, Vec<Subscriber<P>>>,
}

/// Event channel carrying payloads of type `P`
pub struct EventBus<P> {
    registry: Arc<Mutex<Registry<P>>>,
}

impl<P> EventBus<P> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                by_name: HashMap::new(),
            })),
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry<P>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a callback for events named `name`
    pub fn subscribe(
        &self,
        name: impl Into<String>,
        callback: impl Fn(&P) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut registry = self.registry();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;

        let name = name.into();
        log::debug!("subscribe: {:?} on '{}'", id, name);
        registry.by_name.entry(name).or_default().push(Subscriber {
            id,
            callback: Arc::new(callback),
        });
        id
    }

    /// Remove a subscription, returns `false` if it was unknown
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry();
        let found = registry.by_name.iter_mut().find_map(|(name, subscribers)| {
            let pos = subscribers.iter().position(|s| s.id == id)?;
            subscribers.remove(pos);
            Some((name.clone(), subscribers.is_empty()))
        });

        match found {
            Some((name, true)) => {
                registry.by_name.remove(&name);
                true
            }
            Some((_, false)) => true,
            None => false,
        }
    }

    /// Deliver `payload` to every subscriber of `name`
    ///
    /// Returns the number of callbacks invoked.
    pub fn publish(&self, name: &str, payload: &P) -> usize {
        // Snapshot so callbacks run without holding the lock
        let callbacks: Vec<Callback<P>> = match self.registry().by_name.get(name) {
            Some(subscribers) => subscribers.iter().map(|s| Arc::clone(&s.callback)).collect(),
            None => Vec::new(),
        };

        log::trace!("publish: '{}' to {} subscribers", name, callbacks.len());
        for callback in &callbacks {
            callback(payload);
        }
        callbacks.len()
    }

    /// Number of subscribers for `name`
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.registry().by_name.get(name).map_or(0, Vec::len)
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry();
        let mut names: Vec<_> = registry.by_name.keys().collect();
        names.sort();
        f.debug_struct("EventBus")
            .field("events", &names)
            .finish_non_exhaustive()
    }
}
