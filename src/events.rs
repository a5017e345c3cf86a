use std::sync::mpsc;

/// Handle returned by `subscribe`, used to unsubscribe explicitly.
/// Dropping the receiver also unsubscribes on the next broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Fans state snapshots out to subscribers over channels, so no
/// subscriber ever runs inside a transition.
#[derive(Debug)]
pub struct Notifier<T> {
    subscribers: Vec<(u64, mpsc::Sender<T>)>,
    next_id: u64,
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Notifier {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: Clone> Notifier<T> {
    pub fn new() -> Self {
        Notifier::default()
    }

    pub fn subscribe(&mut self) -> (Subscription, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, tx));

        (Subscription(id), rx)
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, _)| *id != subscription.0);

        before != self.subscribers.len()
    }

    pub fn broadcast(&mut self, value: &T) {
        self.subscribers.retain(|(id, tx)| {
            let alive = tx.send(value.clone()).is_ok();
            if !alive {
                log::debug!("subscriber {} disconnected, dropping it", id);
            }
            alive
        });
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_reaches_all_subscribers_in_order() {
        let mut notifier = Notifier::new();
        let (_sub_a, rx_a) = notifier.subscribe();
        let (_sub_b, rx_b) = notifier.subscribe();

        notifier.broadcast(&1);
        notifier.broadcast(&2);

        assert_eq!(rx_a.try_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rx_b.try_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut notifier = Notifier::new();
        let (sub, rx) = notifier.subscribe();

        notifier.broadcast(&1);
        assert!(notifier.unsubscribe(sub));
        assert!(!notifier.unsubscribe(sub));
        notifier.broadcast(&2);

        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut notifier = Notifier::new();
        let (_sub, rx) = notifier.subscribe();
        assert_eq!(notifier.len(), 1);

        drop(rx);
        notifier.broadcast(&1);
        assert!(notifier.is_empty());
    }
}
