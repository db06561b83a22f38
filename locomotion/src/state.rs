use serde::{Deserialize, Serialize};

/// Discrete locomotion state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocomotionState {
    #[default]
    Idle,
    InAir,
    Dodging,
}

impl LocomotionState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::InAir => "InAir",
            Self::Dodging => "Dodging",
        }
    }
}

/// Holds the current [`LocomotionState`].
///
/// Transitions are unconditional: whoever calls [`StateManager::change_state`]
/// owns the legality check and any side effects.
#[derive(Debug, Clone, Default)]
pub struct StateManager {
    current: LocomotionState,
}

impl StateManager {
    pub fn new(initial: LocomotionState) -> Self {
        Self { current: initial }
    }

    pub fn current_state(&self) -> LocomotionState {
        self.current
    }

    pub fn change_state(&mut self, next: LocomotionState) {
        if self.current != next {
            log::debug!("locomotion state {} -> {}", self.current.label(), next.label());
        }
        self.current = next;
    }

    pub fn is(&self, state: LocomotionState) -> bool {
        self.current == state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        assert_eq!(StateManager::default().current_state(), LocomotionState::Idle);
    }

    #[test]
    fn reads_back_last_write() {
        let mut manager = StateManager::default();
        for next in [
            LocomotionState::InAir,
            LocomotionState::Dodging,
            LocomotionState::Dodging,
            LocomotionState::Idle,
        ] {
            manager.change_state(next);
            assert_eq!(manager.current_state(), next);
        }
    }

    #[test]
    fn allows_any_transition() {
        let mut manager = StateManager::new(LocomotionState::InAir);
        manager.change_state(LocomotionState::Dodging);
        assert!(manager.is(LocomotionState::Dodging));
    }
}
