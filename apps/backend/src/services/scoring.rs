//! Completion counters fed by card sessions.

use conjugation_core::{ProgressReport, ProgressSink};
use serde::Serialize;

/// Streak and completion counters across all sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    /// Sentences completed by typing.
    pub completed: u32,
    /// Completions since the last reveal.
    pub streak: u32,
    pub best_streak: u32,
    pub reveals: u32,
}

impl ProgressSink for Scoreboard {
    fn report(&mut self, report: ProgressReport) {
        if report.text_completion {
            self.completed += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else if report.state.full_sentence {
            self.reveals += 1;
            self.streak = 0;
        }
    }
}

/// Whether the card on screen has been scored yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardOutcome {
    #[default]
    Open,
    Completed,
    Revealed,
}

impl CardOutcome {
    /// Record `report` and tell whether it should reach the scoreboard.
    /// Only the first completion or reveal of a card counts.
    pub fn settle(&mut self, report: &ProgressReport) -> bool {
        if *self != CardOutcome::Open {
            return false;
        }
        if report.text_completion {
            *self = CardOutcome::Completed;
        } else if report.state.full_sentence {
            *self = CardOutcome::Revealed;
        } else {
            return false;
        }
        true
    }
}
