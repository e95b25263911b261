use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Process-wide "pointer activated outside any widget" broadcast.
///
/// Widgets subscribe on construction and hold the subscription for their
/// lifetime; dropping it unregisters them, so a late broadcast can never
/// reach a widget that is already gone. Dead subscriptions are pruned on the
/// next broadcast.
pub struct DismissHub {
    senders: Mutex<Vec<Sender<()>>>,
}

impl DismissHub {
    pub fn new() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> DismissSubscription {
        let (tx, rx) = mpsc::channel();
        self.lock_senders().push(tx);
        DismissSubscription { rx }
    }

    /// Signals every live subscription.
    pub fn broadcast(&self) {
        self.lock_senders().retain(|sender| sender.send(()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock_senders().len()
    }

    fn lock_senders(&self) -> std::sync::MutexGuard<'_, Vec<Sender<()>>> {
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DismissHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One widget's registration on the hub. Polled, not callback-driven, so the
/// signal is consumed on the widget's own event-processing thread.
pub struct DismissSubscription {
    rx: Receiver<()>,
}

impl DismissSubscription {
    /// Drains queued signals; true when at least one arrived since the last
    /// poll.
    pub fn take_signal(&self) -> bool {
        let mut signalled = false;
        loop {
            match self.rx.try_recv() {
                Ok(()) => signalled = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        signalled
    }
}

#[cfg(test)]
mod tests {
    use super::DismissHub;

    #[test]
    fn broadcast_reaches_every_subscription_once() {
        let hub = DismissHub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();

        assert!(!first.take_signal());

        hub.broadcast();
        assert!(first.take_signal());
        assert!(second.take_signal());
        assert!(!first.take_signal());
    }

    #[test]
    fn repeated_signals_coalesce_into_one_poll() {
        let hub = DismissHub::new();
        let subscription = hub.subscribe();

        hub.broadcast();
        hub.broadcast();
        assert!(subscription.take_signal());
        assert!(!subscription.take_signal());
    }

    #[test]
    fn dropped_subscriptions_are_pruned_on_broadcast() {
        let hub = DismissHub::new();
        let kept = hub.subscribe();
        let dropped = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        drop(dropped);
        hub.broadcast();
        assert_eq!(hub.subscriber_count(), 1);
        assert!(kept.take_signal());
    }
}
