#![forbid(unsafe_code)]

//! Layout pass sequencing.
//!
//! Every call to [`LayoutSequencer::begin`] issues a fresh, strictly
//! increasing sequence token and supersedes the previous pass. The token is
//! threaded as plain data through every continuation of its pass; each
//! resumption compares it against the live token and drops itself silently
//! on mismatch.
//!
//! # Invariants
//!
//! 1. At most one pass is live at a time.
//! 2. Completion is reported at most once per token.
//! 3. A superseded token can never complete.
//!
//! The sequencer guarantees exactly-once delivery per pass, not exactly-once
//! action overall: the host may start passes concurrently and is responsible
//! for comparing delivered tokens against its own notion of "current".

/// Tracks the live layout pass and gates completion delivery.
#[derive(Debug, Default)]
pub struct LayoutSequencer {
    next: u64,
    live: Option<Pass>,
}

#[derive(Debug)]
struct Pass {
    sequence: u64,
    delivered: bool,
}

impl LayoutSequencer {
    /// Create a sequencer with no live pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new pass, superseding any in-flight one, and return its token.
    pub fn begin(&mut self) -> u64 {
        let sequence = self.next;
        self.next += 1;
        self.live = Some(Pass {
            sequence,
            delivered: false,
        });
        sequence
    }

    /// The token of the live pass, if any.
    pub fn current(&self) -> Option<u64> {
        self.live.as_ref().map(|pass| pass.sequence)
    }

    /// Whether `sequence` identifies the live pass. In-flight steps of
    /// superseded passes use this to drop themselves.
    pub fn is_live(&self, sequence: u64) -> bool {
        self.current() == Some(sequence)
    }

    /// Attempt to mark the pass complete. Returns true exactly once for the
    /// live, not-yet-delivered token; false for stale or repeated attempts.
    pub fn try_complete(&mut self, sequence: u64) -> bool {
        match &mut self.live {
            Some(pass) if pass.sequence == sequence && !pass.delivered => {
                pass.delivered = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_fresh_and_increasing() {
        let mut seq = LayoutSequencer::new();
        let a = seq.begin();
        let b = seq.begin();
        let c = seq.begin();
        assert!(a < b && b < c);
    }

    #[test]
    fn begin_supersedes_previous_pass() {
        let mut seq = LayoutSequencer::new();
        let a = seq.begin();
        assert!(seq.is_live(a));

        let b = seq.begin();
        assert!(!seq.is_live(a));
        assert!(seq.is_live(b));
    }

    #[test]
    fn complete_fires_exactly_once() {
        let mut seq = LayoutSequencer::new();
        let a = seq.begin();
        assert!(seq.try_complete(a));
        assert!(!seq.try_complete(a));
    }

    #[test]
    fn superseded_token_never_completes() {
        let mut seq = LayoutSequencer::new();
        let a = seq.begin();
        let b = seq.begin();
        assert!(!seq.try_complete(a));
        assert!(seq.try_complete(b));
    }

    #[test]
    fn no_live_pass_initially() {
        let seq = LayoutSequencer::new();
        assert_eq!(seq.current(), None);
        assert!(!seq.is_live(0));
    }

    #[test]
    fn unknown_token_never_completes() {
        let mut seq = LayoutSequencer::new();
        seq.begin();
        assert!(!seq.try_complete(999));
    }
}
