//! Network connectivity monitor
//!
//! Single source of truth for online/offline status. The monitor is an
//! explicit, injectable object: platform code feeds transitions in, and
//! consumers subscribe to a typed watch channel instead of reading ambient
//! globals.

use tokio::sync::watch;

/// Connectivity of the two-state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Snapshot published to subscribers on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkState {
    /// Current connectivity
    pub connectivity: Connectivity,
    /// Sticky flag: set on any offline transition, never auto-cleared.
    /// Lets the UI show "reconnected" messaging after a brief offline blip.
    pub was_offline: bool,
}

impl NetworkState {
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }
}

/// Observes connectivity transitions and broadcasts them to subscribers.
///
/// Transitions are driven exclusively by `set_online`/`set_offline` calls
/// from whatever platform signal the binary has; the monitor itself never
/// polls.
pub struct NetworkMonitor {
    sender: watch::Sender<NetworkState>,
}

impl NetworkMonitor {
    /// Create a monitor with the platform's current connectivity, read
    /// synchronously at startup.
    #[must_use]
    pub fn new(initial: Connectivity) -> Self {
        let (sender, _) = watch::channel(NetworkState {
            connectivity: initial,
            was_offline: !initial.is_online(),
        });
        Self { sender }
    }

    /// Record a transition to online. No-op if already online.
    pub fn set_online(&self) {
        self.transition(Connectivity::Online);
    }

    /// Record a transition to offline. No-op if already offline.
    pub fn set_offline(&self) {
        self.transition(Connectivity::Offline);
    }

    fn transition(&self, connectivity: Connectivity) {
        self.sender.send_if_modified(|state| {
            if state.connectivity == connectivity {
                return false;
            }
            state.connectivity = connectivity;
            if !connectivity.is_online() {
                state.was_offline = true;
            }
            true
        });
    }

    /// Current state snapshot
    #[must_use]
    pub fn state(&self) -> NetworkState {
        *self.sender.borrow()
    }

    /// Whether the monitor currently reports online
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.state().is_online()
    }

    /// Subscribe to state transitions
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<NetworkState> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_state() {
        let monitor = NetworkMonitor::new(Connectivity::Online);
        assert!(monitor.is_online());
        assert!(!monitor.state().was_offline);

        let monitor = NetworkMonitor::new(Connectivity::Offline);
        assert!(!monitor.is_online());
        assert!(monitor.state().was_offline);
    }

    #[test]
    fn test_was_offline_is_sticky() {
        let monitor = NetworkMonitor::new(Connectivity::Online);

        monitor.set_offline();
        monitor.set_online();

        let state = monitor.state();
        assert!(state.is_online());
        assert!(state.was_offline, "reconnect must not clear the flag");
    }

    #[test]
    fn test_duplicate_transitions_are_dropped() {
        let monitor = NetworkMonitor::new(Connectivity::Online);
        let mut receiver = monitor.subscribe();

        monitor.set_online();
        assert!(!receiver.has_changed().unwrap());

        monitor.set_offline();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(
            receiver.borrow_and_update().connectivity,
            Connectivity::Offline
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let monitor = NetworkMonitor::new(Connectivity::Offline);
        let mut receiver = monitor.subscribe();

        monitor.set_online();
        receiver.changed().await.unwrap();
        assert!(receiver.borrow_and_update().is_online());
    }
}
