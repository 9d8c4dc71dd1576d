/// Callback invoked whenever the owning store mutates.
type Subscriber = Box<dyn Fn() + Send>;

/// Observer list for store mutations.
///
/// Every mutating store operation calls [`ChangeNotifier::notify`]
/// synchronously, so a presentation layer that subscribed at startup sees
/// each change as it happens. Subscribers cannot be removed; they live as
/// long as the store.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Subscriber>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run after every state change.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn() + Send + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Invoke all subscribers, in subscription order.
    pub fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber();
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_notify_runs_every_subscriber() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut notifier = ChangeNotifier::new();

        for _ in 0..3 {
            let count = count.clone();
            notifier.subscribe(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        notifier.notify();
        assert_eq!(count.load(Ordering::SeqCst), 3);

        notifier.notify();
        assert_eq!(count.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_notify_with_no_subscribers_is_noop() {
        let notifier = ChangeNotifier::new();
        notifier.notify();
    }
}
