#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreDelta {
    Correct,
    Wrong,
}

impl ScoreDelta {
    pub fn is_correct(self) -> bool {
        matches!(self, ScoreDelta::Correct)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub correct: u32,
    pub wrong: u32,
}

impl ScoreState {
    pub fn record_answer(&mut self, chosen: &str, correct: &str) -> ScoreDelta {
        if chosen == correct {
            self.correct += 1;
            ScoreDelta::Correct
        } else {
            self.wrong += 1;
            ScoreDelta::Wrong
        }
    }

    pub fn answered(&self) -> u32 {
        self.correct + self.wrong
    }

    /// Share of correct answers in percent, `None` before the first answer.
    pub fn percentage(&self) -> Option<f64> {
        let total = self.answered();
        if total == 0 {
            return None;
        }
        Some(self.correct as f64 / total as f64 * 100.0)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn label(&self) -> String {
        let pct = match self.percentage() {
            Some(p) => format!("{p:.2}"),
            None => "--".to_string(),
        };
        format!("Score: {} / {} ({pct} %)", self.correct, self.answered())
    }
}
