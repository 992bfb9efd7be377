use serde::{Deserialize, Serialize};

/// Running score and its high-water mark.
pub trait ScoreTracker {
    fn add(&mut self, delta: u32);

    /// Zeroes the score; the high score is kept.
    fn reset(&mut self);

    fn score(&self) -> u32;

    fn set_score(&mut self, score: u32);

    fn high_score(&self) -> u32;

    fn set_high_score(&mut self, high_score: u32);

    /// Raises the high score to the current score if it was exceeded.
    fn update_high_score(&mut self) {
        let high_score = self.high_score().max(self.score());
        self.set_high_score(high_score);
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u32,
    high_score: u32,
}

impl Scoreboard {
    pub const fn new(score: u32, high_score: u32) -> Self {
        Self { score, high_score }
    }
}

impl ScoreTracker for Scoreboard {
    fn add(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }

    fn reset(&mut self) {
        self.score = 0;
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn high_score(&self) -> u32 {
        self.high_score
    }

    fn set_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }
}
