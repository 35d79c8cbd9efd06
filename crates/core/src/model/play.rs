use serde::{Deserialize, Serialize};

use crate::model::ids::QuizId;

/// Per-browser-session state for the random play mode.
///
/// The round lifecycle is a single tagged value: no round exists, a round is
/// live, or a round just drained its pool. "No score" is the absence of an
/// `InProgress` state rather than a stored zero.
///
/// Invariants while `InProgress`: `remaining` holds no duplicates, and an id
/// that has been drawn is never reinserted for that round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RandomPlaySession {
    /// No round exists yet.
    #[default]
    NotStarted,

    /// A round is live: ids not yet presented, and the running score.
    InProgress { remaining: Vec<QuizId>, score: u32 },

    /// The previous round ended by exhausting its pool. Treated exactly like
    /// `NotStarted` by the next play request; the tag only keeps "finished"
    /// from conflating with "never started".
    Finished,
}

impl RandomPlaySession {
    /// Running score; `NotStarted` and `Finished` report zero.
    #[must_use]
    pub fn score(&self) -> u32 {
        match self {
            Self::InProgress { score, .. } => *score,
            Self::NotStarted | Self::Finished => 0,
        }
    }

    /// Ids not yet presented in the current round.
    #[must_use]
    pub fn remaining(&self) -> &[QuizId] {
        match self {
            Self::InProgress { remaining, .. } => remaining,
            Self::NotStarted | Self::Finished => &[],
        }
    }

    /// True while a round is live.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_started() {
        let session = RandomPlaySession::default();
        assert_eq!(session, RandomPlaySession::NotStarted);
        assert_eq!(session.score(), 0);
        assert!(session.remaining().is_empty());
        assert!(!session.is_in_progress());
    }

    #[test]
    fn in_progress_exposes_pool_and_score() {
        let session = RandomPlaySession::InProgress {
            remaining: vec![QuizId::new(1), QuizId::new(3)],
            score: 2,
        };
        assert_eq!(session.score(), 2);
        assert_eq!(session.remaining(), &[QuizId::new(1), QuizId::new(3)]);
        assert!(session.is_in_progress());
    }

    #[test]
    fn finished_reports_no_score() {
        let session = RandomPlaySession::Finished;
        assert_eq!(session.score(), 0);
        assert!(session.remaining().is_empty());
    }
}
