use core::fmt;

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

/// Synchronous latest-value broadcaster.
///
/// Subscribers are called inline during [`publish`](Observable::publish).
/// A new subscriber is immediately called with the most recent value, if any;
/// older values are not replayed.
pub struct Observable<T> {
    latest: Option<T>,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> Observable<T> {
    pub fn new() -> Self {
        Self {
            latest: None,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, f: impl FnMut(&T) + 'static) -> SubscriptionId {
        let mut f: Box<dyn FnMut(&T)> = Box::new(f);
        if let Some(latest) = &self.latest {
            f(latest);
        }

        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, f));
        id
    }

    /// Removes a subscriber. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn publish(&mut self, value: T) {
        for (_, f) in &mut self.subscribers {
            f(&value);
        }
        self.latest = Some(value);
    }

    #[inline]
    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref()
    }

    #[inline]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("latest", &self.latest)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
