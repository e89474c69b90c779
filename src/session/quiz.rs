use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::SmallRng;

use crate::engine::QuizError;
use crate::engine::active_set::{ActiveMode, ActiveSet, select_active_set};
use crate::engine::admin::AdminGate;
use crate::engine::question::{DISTRACTOR_COUNT, QuestionInstance, QuizDirection, generate_question};
use crate::engine::scoring::{ScoreDelta, ScoreState};
use crate::session::timer::{AdvanceTimer, TimerHandle};
use crate::vocab::LessonSet;

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub direction: QuizDirection,
    pub correct_delay: Duration,
    pub incorrect_delay: Duration,
    /// Treat a question with fewer than four options as an error instead of
    /// rendering it short.
    pub refuse_partial: bool,
    pub admin_password: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            direction: QuizDirection::default(),
            correct_delay: Duration::from_millis(100),
            incorrect_delay: Duration::from_millis(1000),
            refuse_partial: false,
            admin_password: "admin".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionStyle {
    Correct,
    Wrong,
}

#[derive(Clone, Debug)]
pub struct AnswerFeedback {
    pub delta: ScoreDelta,
    pub chosen: String,
    pub correct_answer: String,
    /// One hint per option, same order as the question's options.
    pub styles: Vec<OptionStyle>,
    pub delay: Duration,
    pub advance: TimerHandle,
}

impl AnswerFeedback {
    pub fn message(&self) -> &'static str {
        match self.delta {
            ScoreDelta::Correct => "Correct!",
            ScoreDelta::Wrong => "Incorrect. Try again.",
        }
    }
}

/// All mutable quiz state. Every user action enters through one of these
/// methods; nothing here touches the terminal.
pub struct QuizSession<R = SmallRng> {
    lessons: LessonSet,
    mode: ActiveMode,
    active: ActiveSet,
    direction: QuizDirection,
    score: ScoreState,
    question: Option<QuestionInstance>,
    feedback: Option<AnswerFeedback>,
    in_admin: bool,
    gate: AdminGate,
    timer: AdvanceTimer,
    options: SessionOptions,
    rng: R,
}

impl<R: Rng> QuizSession<R> {
    /// Starts in all-lessons mode with no question loaded.
    pub fn new(lessons: LessonSet, options: SessionOptions, rng: R) -> Self {
        let active: ActiveSet = lessons.iter_entries().cloned().collect();
        Self {
            lessons,
            mode: ActiveMode::All,
            active,
            direction: options.direction,
            score: ScoreState::default(),
            question: None,
            feedback: None,
            in_admin: false,
            gate: AdminGate::new(&options.admin_password),
            timer: AdvanceTimer::new(),
            options,
            rng,
        }
    }

    pub fn request_next_question(&mut self) -> Result<&QuestionInstance, QuizError> {
        self.timer.cancel();
        self.feedback = None;
        self.question = None;

        let question = generate_question(&self.active, self.direction, &mut self.rng)?;
        if question.is_partial() && self.options.refuse_partial {
            return Err(QuizError::PartialOptions {
                found: question.distractor_count(),
                wanted: DISTRACTOR_COUNT,
            });
        }
        tracing::debug!(
            prompt = question.prompt_text(),
            options = question.options.len(),
            "next question"
        );
        Ok(&*self.question.insert(question))
    }

    /// Scores `chosen` against the current question and schedules the next
    /// one. Returns `None` when there is nothing to answer or the question
    /// was already answered.
    pub fn select_answer(&mut self, chosen: &str, now: Instant) -> Option<&AnswerFeedback> {
        if self.feedback.is_some() || self.in_admin {
            return None;
        }
        let question = self.question.as_ref()?;

        let delta = self.score.record_answer(chosen, &question.correct_answer);
        let styles = question
            .options
            .iter()
            .map(|option| {
                if question.is_correct(option) {
                    OptionStyle::Correct
                } else {
                    OptionStyle::Wrong
                }
            })
            .collect();
        let delay = if delta.is_correct() {
            self.options.correct_delay
        } else {
            self.options.incorrect_delay
        };
        let advance = self.timer.schedule(now, delay);

        tracing::debug!(?delta, chosen, correct = %question.correct_answer, "answer recorded");

        Some(&*self.feedback.insert(AnswerFeedback {
            delta,
            chosen: chosen.to_string(),
            correct_answer: question.correct_answer.clone(),
            styles,
            delay,
            advance,
        }))
    }

    /// Answers with the option at `index` of the current question.
    pub fn select_option(&mut self, index: usize, now: Instant) -> Option<&AnswerFeedback> {
        let chosen = self.question.as_ref()?.options.get(index)?.clone();
        self.select_answer(&chosen, now)
    }

    /// Flips prompt and answer languages and loads a fresh question. The
    /// score carries over.
    pub fn toggle_direction(&mut self) -> Result<&QuestionInstance, QuizError> {
        self.direction = self.direction.toggled();
        tracing::info!(direction = self.direction.as_str(), "direction changed");
        self.request_next_question()
    }

    /// Switches the active set. A rejected selection leaves mode, words,
    /// score and question as they were; an accepted one resets the score.
    pub fn set_mode(&mut self, mode: ActiveMode) -> Result<(), QuizError> {
        let active = select_active_set(&self.lessons, &mode)?;
        tracing::info!(mode = mode.label(), words = active.len(), "active set changed");
        self.mode = mode;
        self.active = active;
        self.score.reset();
        self.request_next_question().map(|_| ())
    }

    pub fn admin_login(&mut self, attempt: &str) -> bool {
        if !self.gate.check(attempt) {
            tracing::warn!("rejected admin password");
            return false;
        }
        if let Some(feedback) = &self.feedback {
            self.timer.cancel_handle(feedback.advance);
        }
        self.in_admin = true;
        tracing::info!("admin view opened");
        true
    }

    pub fn logout(&mut self) -> Result<(), QuizError> {
        self.in_admin = false;
        self.score.reset();
        tracing::info!("logged out");
        self.request_next_question().map(|_| ())
    }

    /// Loads the next question once the post-answer delay has elapsed.
    /// Returns `None` when nothing was due.
    pub fn poll_timer(&mut self, now: Instant) -> Option<Result<(), QuizError>> {
        if self.in_admin || !self.timer.poll(now) {
            return None;
        }
        Some(self.request_next_question().map(|_| ()))
    }

    pub fn lessons(&self) -> &LessonSet {
        &self.lessons
    }

    pub fn lesson_names(&self) -> Vec<&str> {
        self.lessons.lesson_names()
    }

    pub fn mode(&self) -> &ActiveMode {
        &self.mode
    }

    pub fn active_set(&self) -> &ActiveSet {
        &self.active
    }

    pub fn direction(&self) -> QuizDirection {
        self.direction
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn question(&self) -> Option<&QuestionInstance> {
        self.question.as_ref()
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.in_admin
    }

    pub fn advance_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Time left before the answered question is replaced.
    pub fn advance_remaining(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::vocab::{VocabularyEntry, same_entry};

    fn words(prefix: &str, n: usize) -> Vec<VocabularyEntry> {
        (0..n)
            .map(|i| VocabularyEntry::new(&format!("{prefix}-ko{i}"), &format!("{prefix}-si{i}")))
            .collect()
    }

    fn session(lessons: LessonSet) -> QuizSession<SmallRng> {
        QuizSession::new(lessons, SessionOptions::default(), SmallRng::seed_from_u64(42))
    }

    fn two_lessons() -> LessonSet {
        let mut lessons = LessonSet::new();
        lessons.push_lesson("L1", words("a", 5));
        lessons.push_lesson("L2", words("b", 6));
        lessons
    }

    #[test]
    fn correct_answer_scores_and_schedules_short_advance() {
        let mut s = session(two_lessons());
        s.request_next_question().unwrap();
        let correct = s.question().unwrap().correct_answer.clone();
        let t0 = Instant::now();

        let fb = s.select_answer(&correct, t0).unwrap();
        assert_eq!(fb.delta, ScoreDelta::Correct);
        assert_eq!(fb.delay, Duration::from_millis(100));
        assert_eq!(fb.message(), "Correct!");
        assert_eq!(s.score(), &ScoreState { correct: 1, wrong: 0 });

        assert!(s.poll_timer(t0 + Duration::from_millis(50)).is_none());
        assert!(matches!(s.poll_timer(t0 + Duration::from_millis(100)), Some(Ok(()))));
        assert!(s.feedback().is_none());
    }

    #[test]
    fn wrong_answer_marks_every_other_option_wrong() {
        let mut s = session(two_lessons());
        s.request_next_question().unwrap();
        let q = s.question().unwrap().clone();
        let wrong = q.options.iter().find(|o| !q.is_correct(o)).unwrap().clone();

        let fb = s.select_answer(&wrong, Instant::now()).unwrap().clone();
        assert_eq!(fb.delta, ScoreDelta::Wrong);
        assert_eq!(fb.delay, Duration::from_millis(1000));
        for (option, style) in q.options.iter().zip(&fb.styles) {
            let expected = if q.is_correct(option) {
                OptionStyle::Correct
            } else {
                OptionStyle::Wrong
            };
            assert_eq!(*style, expected);
        }
        assert_eq!(s.score(), &ScoreState { correct: 0, wrong: 1 });
    }

    #[test]
    fn second_answer_to_same_question_is_ignored() {
        let mut s = session(two_lessons());
        s.request_next_question().unwrap();
        let correct = s.question().unwrap().correct_answer.clone();
        let now = Instant::now();
        assert!(s.select_answer(&correct, now).is_some());
        assert!(s.select_answer(&correct, now).is_none());
        assert_eq!(s.score().answered(), 1);
    }

    #[test]
    fn answer_without_question_is_ignored() {
        let mut s = session(two_lessons());
        assert!(s.select_answer("anything", Instant::now()).is_none());
        assert!(s.select_option(0, Instant::now()).is_none());
    }

    #[test]
    fn switching_to_single_lesson_resets_score_and_narrows_set() {
        let mut s = session(two_lessons());
        s.request_next_question().unwrap();
        let correct = s.question().unwrap().correct_answer.clone();
        s.select_answer(&correct, Instant::now());
        assert_eq!(s.score().correct, 1);

        s.set_mode(ActiveMode::Single("L1".into())).unwrap();
        assert_eq!(s.score(), &ScoreState::default());
        let lesson = &s.lessons().lesson("L1").unwrap().entries;
        assert_eq!(s.active_set().len(), lesson.len());
        for (a, b) in s.active_set().iter().zip(lesson) {
            assert!(same_entry(a, b));
        }
        assert!(!s.advance_pending());
    }

    #[test]
    fn missing_selection_keeps_previous_state() {
        let mut s = session(two_lessons());
        s.request_next_question().unwrap();
        let correct = s.question().unwrap().correct_answer.clone();
        s.select_answer(&correct, Instant::now());

        let err = s.set_mode(ActiveMode::Single(String::new())).unwrap_err();
        assert_eq!(err, QuizError::MissingSelection);
        assert_eq!(s.mode(), &ActiveMode::All);
        assert_eq!(s.active_set().len(), 11);
        assert_eq!(s.score().correct, 1);
        assert!(s.question().is_some());
        assert!(s.advance_pending());
    }

    #[test]
    fn toggling_direction_keeps_score_and_swaps_fields() {
        let mut s = session(two_lessons());
        s.request_next_question().unwrap();
        let correct = s.question().unwrap().correct_answer.clone();
        s.select_answer(&correct, Instant::now());

        let q = s.toggle_direction().unwrap();
        assert_eq!(q.direction, QuizDirection::SinhaleseToKorean);
        assert_eq!(q.correct_answer, q.prompt.korean);
        assert_eq!(q.prompt_text(), q.prompt.sinhalese);
        assert_eq!(s.score().correct, 1);
        assert!(!s.advance_pending());
    }

    #[test]
    fn small_lesson_reports_insufficient_data_without_question() {
        let mut lessons = two_lessons();
        lessons.push_lesson("tiny", words("c", 3));
        let mut s = session(lessons);
        s.request_next_question().unwrap();

        let err = s.set_mode(ActiveMode::Single("tiny".into())).unwrap_err();
        assert_eq!(err, QuizError::InsufficientData { found: 3, required: 4 });
        assert!(s.question().is_none());
        assert!(s.feedback().is_none());
    }

    #[test]
    fn refuse_partial_policy_turns_short_question_into_error() {
        let mut lessons = LessonSet::new();
        lessons.push_lesson(
            "L1",
            vec![
                VocabularyEntry::new("가", "ක"),
                VocabularyEntry::new("나", "න"),
                VocabularyEntry::new("다", "ක"),
                VocabularyEntry::new("라", "න"),
            ],
        );
        let options = SessionOptions {
            refuse_partial: true,
            ..SessionOptions::default()
        };
        let mut s = QuizSession::new(lessons, options, SmallRng::seed_from_u64(3));
        let err = s.request_next_question().unwrap_err();
        assert_eq!(err, QuizError::PartialOptions { found: 1, wanted: 3 });
        assert!(s.question().is_none());
    }

    #[test]
    fn admin_login_cancels_pending_advance_and_logout_resets_score() {
        let mut s = session(two_lessons());
        s.request_next_question().unwrap();
        let correct = s.question().unwrap().correct_answer.clone();
        let t0 = Instant::now();
        s.select_answer(&correct, t0);

        assert!(!s.admin_login("wrong"));
        assert!(!s.is_admin());
        assert_eq!(
            s.advance_remaining(t0 + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert!(s.admin_login("admin"));
        assert!(s.is_admin());
        assert!(!s.advance_pending());
        assert_eq!(s.advance_remaining(t0), None);
        assert!(s.poll_timer(t0 + Duration::from_secs(5)).is_none());

        s.logout().unwrap();
        assert!(!s.is_admin());
        assert_eq!(s.score(), &ScoreState::default());
        assert!(s.question().is_some());
        assert!(s.feedback().is_none());
    }
}
