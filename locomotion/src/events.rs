//! In-process notification channels.
//!
//! Each [`Signal`] is one named channel. Listeners are keyed by a
//! [`ListenerId`]: registering the same id twice drops the earlier callback
//! and appends the new one at the end of the call order, so a listener is
//! called at most once per invocation. Listeners
//! run synchronously and must not re-enter the component that owns the
//! signal.

use std::fmt;

/// Identifies one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

type Listener = Box<dyn FnMut() + Send + Sync>;

#[derive(Default)]
pub struct Signal {
    listeners: Vec<(ListenerId, Listener)>,
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field(
                "listeners",
                &self.listeners.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener<F>(&mut self, id: ListenerId, listener: F)
    where
        F: FnMut() + Send + Sync + 'static,
    {
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.push((id, Box::new(listener)));
    }

    /// Returns whether a registration was removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn invoke(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Notifications raised by the movement controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionEvent {
    Jumped,
    DoubleJumped,
    DodgeStarted,
    DodgeFinished,
}

impl LocomotionEvent {
    pub const ALL: [Self; 4] = [
        Self::Jumped,
        Self::DoubleJumped,
        Self::DodgeStarted,
        Self::DodgeFinished,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Jumped => "jumped",
            Self::DoubleJumped => "double-jumped",
            Self::DodgeStarted => "dodge-started",
            Self::DodgeFinished => "dodge-finished",
        }
    }
}

/// One [`Signal`] per [`LocomotionEvent`], plus an outbox of the events
/// emitted since the host last drained it.
#[derive(Debug, Default)]
pub struct LocomotionSignals {
    jumped: Signal,
    double_jumped: Signal,
    dodge_started: Signal,
    dodge_finished: Signal,
    emitted: Vec<LocomotionEvent>,
}

impl LocomotionSignals {
    pub fn signal(&self, event: LocomotionEvent) -> &Signal {
        match event {
            LocomotionEvent::Jumped => &self.jumped,
            LocomotionEvent::DoubleJumped => &self.double_jumped,
            LocomotionEvent::DodgeStarted => &self.dodge_started,
            LocomotionEvent::DodgeFinished => &self.dodge_finished,
        }
    }

    pub fn signal_mut(&mut self, event: LocomotionEvent) -> &mut Signal {
        match event {
            LocomotionEvent::Jumped => &mut self.jumped,
            LocomotionEvent::DoubleJumped => &mut self.double_jumped,
            LocomotionEvent::DodgeStarted => &mut self.dodge_started,
            LocomotionEvent::DodgeFinished => &mut self.dodge_finished,
        }
    }

    pub fn add_listener<F>(&mut self, event: LocomotionEvent, id: ListenerId, listener: F)
    where
        F: FnMut() + Send + Sync + 'static,
    {
        self.signal_mut(event).add_listener(id, listener);
    }

    pub fn remove_listener(&mut self, event: LocomotionEvent, id: ListenerId) -> bool {
        self.signal_mut(event).remove_listener(id)
    }

    /// Removes `id` from every channel, for listener teardown.
    pub fn remove_listener_everywhere(&mut self, id: ListenerId) {
        for event in LocomotionEvent::ALL {
            self.signal_mut(event).remove_listener(id);
        }
    }

    pub fn emit(&mut self, event: LocomotionEvent) {
        log::debug!("locomotion event: {}", event.name());
        self.emitted.push(event);
        self.signal_mut(event).invoke();
    }

    /// Drains events emitted since the previous call.
    pub fn take_emitted(&mut self) -> Vec<LocomotionEvent> {
        std::mem::take(&mut self.emitted)
    }

    pub fn emitted(&self) -> &[LocomotionEvent] {
        &self.emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn re_registering_replaces_listener() {
        let mut signal = Signal::new();
        let (first, first_listener) = counter();
        let (second, second_listener) = counter();

        signal.add_listener(ListenerId(1), first_listener);
        signal.add_listener(ListenerId(1), second_listener);
        signal.invoke();

        assert_eq!(signal.listener_count(), 1);
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn re_registering_moves_listener_to_end_of_call_order() {
        let mut signal = Signal::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for id in [1, 2, 1] {
            let order = Arc::clone(&order);
            signal.add_listener(ListenerId(id), move || {
                order.lock().expect("order lock").push(id);
            });
        }

        signal.invoke();

        assert_eq!(*order.lock().expect("order lock"), vec![2, 1]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let mut signal = Signal::new();
        let (count, listener) = counter();
        signal.add_listener(ListenerId(7), listener);

        assert!(signal.remove_listener(ListenerId(7)));
        assert!(!signal.remove_listener(ListenerId(7)));
        signal.invoke();

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn emit_routes_to_named_channel_and_outbox() {
        let mut signals = LocomotionSignals::default();
        let (jumps, jump_listener) = counter();
        let (dodges, dodge_listener) = counter();
        signals.add_listener(LocomotionEvent::Jumped, ListenerId(1), jump_listener);
        signals.add_listener(LocomotionEvent::DodgeStarted, ListenerId(1), dodge_listener);

        signals.emit(LocomotionEvent::Jumped);
        signals.emit(LocomotionEvent::Jumped);

        assert_eq!(jumps.load(Ordering::SeqCst), 2);
        assert_eq!(dodges.load(Ordering::SeqCst), 0);
        assert_eq!(
            signals.take_emitted(),
            vec![LocomotionEvent::Jumped, LocomotionEvent::Jumped]
        );
        assert!(signals.emitted().is_empty());
    }

    #[test]
    fn teardown_removes_listener_from_every_channel() {
        let mut signals = LocomotionSignals::default();
        for event in LocomotionEvent::ALL {
            signals.add_listener(event, ListenerId(3), || {});
        }
        signals.remove_listener_everywhere(ListenerId(3));
        for event in LocomotionEvent::ALL {
            assert_eq!(signals.signal(event).listener_count(), 0);
        }
    }
}
