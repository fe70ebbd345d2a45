//! Call lifecycle tracking.

use std::fmt;

use uuid::Uuid;

/// Lifecycle of one chat call.
///
/// `Idle -> Building -> InFlight -> Streaming | Completing -> Done | Failed`.
/// Only the streaming path can end in `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    Idle,
    Building,
    InFlight,
    Streaming,
    Completing,
    Done,
    Failed,
    Cancelled,
}

impl CallPhase {
    /// Whether the call has reached a final phase.
    pub fn is_final(&self) -> bool {
        matches!(self, CallPhase::Done | CallPhase::Failed | CallPhase::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallPhase::Idle => "idle",
            CallPhase::Building => "building",
            CallPhase::InFlight => "in_flight",
            CallPhase::Streaming => "streaming",
            CallPhase::Completing => "completing",
            CallPhase::Done => "done",
            CallPhase::Failed => "failed",
            CallPhase::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current phase of a call, logging every transition.
#[derive(Debug)]
pub(crate) struct PhaseTracker {
    call_id: Uuid,
    operation: &'static str,
    phase: CallPhase,
}

impl PhaseTracker {
    pub(crate) fn new(call_id: Uuid, operation: &'static str) -> Self {
        Self {
            call_id,
            operation,
            phase: CallPhase::Idle,
        }
    }

    pub(crate) fn call_id(&self) -> Uuid {
        self.call_id
    }

    pub(crate) fn phase(&self) -> CallPhase {
        self.phase
    }

    /// Move to `next`. Transitions out of a final phase are ignored.
    pub(crate) fn advance(&mut self, next: CallPhase) {
        if self.phase.is_final() {
            return;
        }
        tracing::debug!(
            call_id = %self.call_id,
            operation = self.operation,
            "{} -> {}",
            self.phase,
            next
        );
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_starts_idle() {
        let tracker = PhaseTracker::new(Uuid::new_v4(), "send_message");
        assert_eq!(tracker.phase(), CallPhase::Idle);
    }

    #[test]
    fn test_final_phase_sticks() {
        let mut tracker = PhaseTracker::new(Uuid::new_v4(), "send_stream_message");
        tracker.advance(CallPhase::Building);
        tracker.advance(CallPhase::InFlight);
        tracker.advance(CallPhase::Cancelled);
        tracker.advance(CallPhase::Done);
        assert_eq!(tracker.phase(), CallPhase::Cancelled);
    }

    #[test]
    fn test_display() {
        assert_eq!(CallPhase::InFlight.to_string(), "in_flight");
        assert!(CallPhase::Failed.is_final());
        assert!(!CallPhase::Streaming.is_final());
    }
}
