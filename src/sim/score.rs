//! Score and best-score tracking

/// Running score plus the best value seen since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u64,
    high_score: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Add one point; returns true if this set a new high score
    pub fn advance(&mut self) -> bool {
        self.score += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Drop the score to zero. The high score is kept.
    pub fn reset(&mut self) {
        self.score = 0;
    }
}
