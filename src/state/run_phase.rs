/// Run phase definitions for a single harvest run
use std::fmt;

/// Represents the phase of a harvest run
///
/// A run moves strictly forward: `Idle -> IndexFetched -> Crawling -> Persisted`.
/// `Idle -> Persisted` is allowed for a run whose index page could not be
/// fetched, and `IndexFetched -> Persisted` for an index with no detail links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// Nothing fetched yet
    Idle,

    /// Index page fetched and its identifiers extracted
    IndexFetched,

    /// Detail pages are being processed
    Crawling,

    /// Final collection written to the output document
    Persisted,
}

impl RunPhase {
    /// Returns true if moving from `self` to `next` is a valid transition
    pub fn can_transition_to(&self, next: RunPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::IndexFetched)
                | (Self::Idle, Self::Persisted)
                | (Self::IndexFetched, Self::Crawling)
                | (Self::IndexFetched, Self::Persisted)
                | (Self::Crawling, Self::Persisted)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::IndexFetched => "index_fetched",
            Self::Crawling => "crawling",
            Self::Persisted => "persisted",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(RunPhase::Idle.can_transition_to(RunPhase::IndexFetched));
        assert!(RunPhase::IndexFetched.can_transition_to(RunPhase::Crawling));
        assert!(RunPhase::Crawling.can_transition_to(RunPhase::Persisted));
    }

    #[test]
    fn test_shortcut_to_persisted() {
        assert!(RunPhase::Idle.can_transition_to(RunPhase::Persisted));
        assert!(RunPhase::IndexFetched.can_transition_to(RunPhase::Persisted));
    }

    #[test]
    fn test_no_backward_transitions() {
        assert!(!RunPhase::Crawling.can_transition_to(RunPhase::IndexFetched));
        assert!(!RunPhase::Persisted.can_transition_to(RunPhase::Idle));
        assert!(!RunPhase::Persisted.can_transition_to(RunPhase::Crawling));
        assert!(!RunPhase::Idle.can_transition_to(RunPhase::Crawling));
    }

    #[test]
    fn test_display() {
        assert_eq!(RunPhase::IndexFetched.to_string(), "index_fetched");
    }
}
