//! Display driver state machine
//!
//! The controller starts uninitialized and becomes ready once `init()` has
//! configured the device. Operations are not refused in the uninitialized
//! state; the state is only reported.

/// Driver lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Constructed, device not yet configured
    #[default]
    Uninitialized,
    /// `init()` completed; strobe idle, brightness sent, display on
    Ready,
}

/// Events that move the driver between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverEvent {
    /// Initialization sequence finished on the wire
    InitComplete,
    /// Bus and pins handed back to the caller
    Released,
}

impl DriverState {
    /// Next state for an event
    pub fn transition(self, event: DriverEvent) -> Self {
        match (self, event) {
            (_, DriverEvent::InitComplete) => DriverState::Ready,
            (_, DriverEvent::Released) => DriverState::Uninitialized,
        }
    }

    /// Whether the device has been configured
    pub fn is_ready(&self) -> bool {
        matches!(self, DriverState::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_moves_to_ready() {
        let state = DriverState::default();
        assert!(!state.is_ready());

        let state = state.transition(DriverEvent::InitComplete);
        assert_eq!(state, DriverState::Ready);

        // Re-init stays ready
        assert!(state.transition(DriverEvent::InitComplete).is_ready());
    }

    #[test]
    fn test_release_resets() {
        let state = DriverState::Ready.transition(DriverEvent::Released);
        assert_eq!(state, DriverState::Uninitialized);
    }
}
