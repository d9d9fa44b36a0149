use std::time::{Duration, Instant};

/// Debouncer state: quiescent, or holding the latest value until its
/// deadline passes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DebounceState {
    Idle,
    Pending { deadline: Instant, value: String },
}

/// Suppresses intermediate values of a rapidly changing input, emitting only
/// the last pushed value once no new input has arrived for the settle
/// interval. Time is passed in explicitly; there is no internal timer to
/// leak.
#[derive(Debug, Clone)]
pub struct Debouncer {
    settle: Duration,
    state: DebounceState,
}

impl Debouncer {
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            state: DebounceState::Idle,
        }
    }

    /// Records a new raw value and re-arms the deadline.
    pub fn push(&mut self, value: impl Into<String>, now: Instant) {
        self.state = DebounceState::Pending {
            deadline: now + self.settle,
            value: value.into(),
        };
    }

    /// Emits the pending value if its deadline has passed. Emits at most
    /// once per settle window.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.state {
            DebounceState::Pending { deadline, value } if now >= *deadline => {
                let value = value.clone();
                self.state = DebounceState::Idle;
                Some(value)
            }
            _ => None,
        }
    }

    /// Clears any pending value without emitting it.
    pub fn cancel(&mut self) {
        self.state = DebounceState::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = Duration::from_millis(300);

    #[test]
    fn rapid_pushes_emit_only_the_final_value() {
        let mut debouncer = Debouncer::new(SETTLE);
        let start = Instant::now();

        for (i, input) in ["t", "te", "tec", "tech"].iter().enumerate() {
            let at = start + Duration::from_millis(50 * i as u64);
            debouncer.push(*input, at);
            assert_eq!(debouncer.poll(at), None);
        }

        let last_push = start + Duration::from_millis(150);
        assert_eq!(debouncer.poll(last_push + SETTLE), Some("tech".to_string()));
        // Quiescent afterwards; nothing further to emit.
        assert_eq!(debouncer.poll(last_push + SETTLE * 2), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn a_new_push_resets_the_deadline() {
        let mut debouncer = Debouncer::new(SETTLE);
        let start = Instant::now();

        debouncer.push("a", start);
        let almost = start + SETTLE - Duration::from_millis(1);
        debouncer.push("ab", almost);

        assert_eq!(debouncer.poll(start + SETTLE), None);
        assert_eq!(debouncer.poll(almost + SETTLE), Some("ab".to_string()));
    }

    #[test]
    fn cancel_drops_the_pending_value() {
        let mut debouncer = Debouncer::new(SETTLE);
        let start = Instant::now();

        debouncer.push("stale", start);
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + SETTLE * 2), None);
    }
}
