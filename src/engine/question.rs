use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::error::QuizError;
use crate::vocab::{EntryRef, VocabularyEntry, same_entry};

pub const MIN_ACTIVE_WORDS: usize = 4;
pub const DISTRACTOR_COUNT: usize = 3;
pub const MAX_DISTRACTOR_DRAWS: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuizDirection {
    #[default]
    KoreanToSinhalese,
    SinhaleseToKorean,
}

impl QuizDirection {
    pub fn toggled(self) -> Self {
        match self {
            QuizDirection::KoreanToSinhalese => QuizDirection::SinhaleseToKorean,
            QuizDirection::SinhaleseToKorean => QuizDirection::KoreanToSinhalese,
        }
    }

    pub fn prompt_text(self, entry: &VocabularyEntry) -> &str {
        match self {
            QuizDirection::KoreanToSinhalese => &entry.korean,
            QuizDirection::SinhaleseToKorean => &entry.sinhalese,
        }
    }

    pub fn answer_text(self, entry: &VocabularyEntry) -> &str {
        match self {
            QuizDirection::KoreanToSinhalese => &entry.sinhalese,
            QuizDirection::SinhaleseToKorean => &entry.korean,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuizDirection::KoreanToSinhalese => "ko-si",
            QuizDirection::SinhaleseToKorean => "si-ko",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ko-si" | "korean-to-sinhalese" => Some(QuizDirection::KoreanToSinhalese),
            "si-ko" | "sinhalese-to-korean" => Some(QuizDirection::SinhaleseToKorean),
            _ => None,
        }
    }

    /// Label for the toggle control: names the direction it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            QuizDirection::KoreanToSinhalese => "සිං > 한",
            QuizDirection::SinhaleseToKorean => "한 > සිං",
        }
    }

    pub fn arrow_label(self) -> &'static str {
        match self {
            QuizDirection::KoreanToSinhalese => "한 → සිං",
            QuizDirection::SinhaleseToKorean => "සිං → 한",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            QuizDirection::KoreanToSinhalese => "Translate this Korean word:",
            QuizDirection::SinhaleseToKorean => "Translate this Sinhalese word:",
        }
    }
}

#[derive(Clone, Debug)]
pub struct QuestionInstance {
    pub prompt: EntryRef,
    /// Position of the prompt entry inside the active set it was drawn from.
    pub prompt_index: usize,
    pub direction: QuizDirection,
    pub correct_answer: String,
    pub options: Vec<String>,
}

impl QuestionInstance {
    pub fn prompt_text(&self) -> &str {
        self.direction.prompt_text(&self.prompt)
    }

    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen == self.correct_answer
    }

    pub fn distractor_count(&self) -> usize {
        self.options.len().saturating_sub(1)
    }

    /// True when fewer than three distractors were found.
    pub fn is_partial(&self) -> bool {
        self.distractor_count() < DISTRACTOR_COUNT
    }
}

fn duplicates(a: &EntryRef, b: &EntryRef) -> bool {
    same_entry(a, b) || **a == **b
}

/// Indices that may serve as the prompt: never the first or last position,
/// never next to an identical entry.
pub fn eligible_targets(active: &[EntryRef]) -> Vec<usize> {
    if active.len() < 3 {
        return Vec::new();
    }
    (1..active.len() - 1)
        .filter(|&i| !duplicates(&active[i], &active[i - 1]) && !duplicates(&active[i], &active[i + 1]))
        .collect()
}

fn collect_distractors<R: Rng + ?Sized>(
    active: &[EntryRef],
    direction: QuizDirection,
    correct: &str,
    rng: &mut R,
) -> Vec<String> {
    let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
    for _ in 0..MAX_DISTRACTOR_DRAWS {
        if distractors.len() == DISTRACTOR_COUNT {
            break;
        }
        let Some(entry) = active.choose(rng) else {
            break;
        };
        let answer = direction.answer_text(entry);
        if answer != correct && !distractors.iter().any(|d| d == answer) {
            distractors.push(answer.to_string());
        }
    }
    distractors
}

pub fn generate_question<R: Rng + ?Sized>(
    active: &[EntryRef],
    direction: QuizDirection,
    rng: &mut R,
) -> Result<QuestionInstance, QuizError> {
    if active.len() < MIN_ACTIVE_WORDS {
        return Err(QuizError::InsufficientData {
            found: active.len(),
            required: MIN_ACTIVE_WORDS,
        });
    }

    let eligible = eligible_targets(active);
    let prompt_index = *eligible.choose(rng).ok_or(QuizError::NoEligibleTarget)?;
    let prompt = active[prompt_index].clone();

    let correct_answer = direction.answer_text(&prompt).to_string();
    let distractors = collect_distractors(active, direction, &correct_answer, rng);

    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct_answer.clone());
    options.extend(distractors);
    options.shuffle(rng);

    if options.len() <= DISTRACTOR_COUNT {
        tracing::debug!(
            prompt = direction.prompt_text(&prompt),
            options = options.len(),
            "question has fewer than four options"
        );
    }

    Ok(QuestionInstance {
        prompt,
        prompt_index,
        direction,
        correct_answer,
        options,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<EntryRef> {
        pairs
            .iter()
            .map(|(ko, si)| Rc::new(VocabularyEntry::new(ko, si)))
            .collect()
    }

    fn numbered(n: usize) -> Vec<EntryRef> {
        (0..n)
            .map(|i| Rc::new(VocabularyEntry::new(&format!("ko{i}"), &format!("si{i}"))))
            .collect()
    }

    #[test]
    fn fewer_than_four_words_is_insufficient() {
        let mut rng = SmallRng::seed_from_u64(1);
        for n in 0..4 {
            let active = numbered(n);
            let err = generate_question(&active, QuizDirection::KoreanToSinhalese, &mut rng)
                .unwrap_err();
            assert_eq!(err, QuizError::InsufficientData { found: n, required: 4 });
        }
    }

    #[test]
    fn question_has_one_correct_and_distinct_distractors() {
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let active = numbered(10);
            let q = generate_question(&active, QuizDirection::KoreanToSinhalese, &mut rng).unwrap();

            assert_eq!(q.options.len(), 4);
            assert!(!q.is_partial());
            assert_eq!(q.options.iter().filter(|o| **o == q.correct_answer).count(), 1);
            let unique: HashSet<&String> = q.options.iter().collect();
            assert_eq!(unique.len(), q.options.len());
            assert_eq!(q.correct_answer, q.prompt.sinhalese);
        }
    }

    #[test]
    fn target_is_never_first_or_last() {
        let active = numbered(5);
        for seed in 0..300 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let q = generate_question(&active, QuizDirection::KoreanToSinhalese, &mut rng).unwrap();
            assert!(q.prompt_index != 0 && q.prompt_index != active.len() - 1);
            assert!(same_entry(&q.prompt, &active[q.prompt_index]));
        }
    }

    #[test]
    fn four_word_set_only_targets_middle_entries() {
        let active = numbered(4);
        let mut seen = HashSet::new();
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let q = generate_question(&active, QuizDirection::SinhaleseToKorean, &mut rng).unwrap();
            seen.insert(q.prompt_index);
            assert_eq!(q.correct_answer, q.prompt.korean);
        }
        assert_eq!(seen, HashSet::from([1, 2]));
    }

    #[test]
    fn target_skips_entries_next_to_duplicates() {
        let shared = Rc::new(VocabularyEntry::new("ko-dup", "si-dup"));
        let mut active = numbered(6);
        // Same handle twice at 2..=3, and an equal-text copy at 4.
        active[2] = shared.clone();
        active[3] = shared.clone();
        active[4] = Rc::new(VocabularyEntry::new("ko-dup", "si-dup"));

        assert_eq!(eligible_targets(&active), vec![1]);
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let q = generate_question(&active, QuizDirection::KoreanToSinhalese, &mut rng).unwrap();
            assert_eq!(q.prompt_index, 1);
        }
    }

    #[test]
    fn all_duplicates_has_no_eligible_target() {
        let shared = Rc::new(VocabularyEntry::new("같다", "සමාන"));
        let active = vec![shared.clone(), shared.clone(), shared.clone(), shared];
        let mut rng = SmallRng::seed_from_u64(7);
        let err = generate_question(&active, QuizDirection::KoreanToSinhalese, &mut rng).unwrap_err();
        assert_eq!(err, QuizError::NoEligibleTarget);
    }

    #[test]
    fn low_diversity_set_yields_partial_question() {
        // Only two distinct Sinhala texts exist, so at most one distractor.
        let active = entries(&[
            ("가", "ක"),
            ("나", "න"),
            ("다", "ක"),
            ("라", "න"),
            ("마", "ක"),
        ]);
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let q = generate_question(&active, QuizDirection::KoreanToSinhalese, &mut rng).unwrap();
            assert!(q.is_partial());
            assert_eq!(q.options.len(), 2);
            assert!(q.options.iter().all(|o| o == "ක" || o == "න"));
            assert_ne!(q.options[0], q.options[1]);
        }
    }

    #[test]
    fn shuffle_places_correct_answer_in_every_slot() {
        let active = numbered(12);
        let mut positions = HashSet::new();
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let q = generate_question(&active, QuizDirection::KoreanToSinhalese, &mut rng).unwrap();
            let pos = q.options.iter().position(|o| *o == q.correct_answer).unwrap();
            positions.insert(pos);
        }
        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn direction_round_trips_through_names() {
        for dir in [QuizDirection::KoreanToSinhalese, QuizDirection::SinhaleseToKorean] {
            assert_eq!(QuizDirection::from_name(dir.as_str()), Some(dir));
            assert_eq!(dir.toggled().toggled(), dir);
        }
        assert_eq!(QuizDirection::from_name("sideways"), None);
    }
}
