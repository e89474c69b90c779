use crate::engine::error::QuizError;
use crate::vocab::{EntryRef, LessonSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveMode {
    All,
    Single(String),
}

impl ActiveMode {
    pub fn label(&self) -> &str {
        match self {
            ActiveMode::All => "All lessons",
            ActiveMode::Single(name) => name,
        }
    }
}

pub type ActiveSet = Vec<EntryRef>;

pub fn select_active_set(lessons: &LessonSet, mode: &ActiveMode) -> Result<ActiveSet, QuizError> {
    match mode {
        ActiveMode::All => Ok(lessons.iter_entries().cloned().collect()),
        ActiveMode::Single(key) => {
            if key.trim().is_empty() {
                return Err(QuizError::MissingSelection);
            }
            lessons
                .lesson(key)
                .map(|lesson| lesson.entries.clone())
                .ok_or_else(|| QuizError::UnknownLesson(key.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{VocabularyEntry, same_entry};

    fn words(prefix: &str, n: usize) -> Vec<VocabularyEntry> {
        (0..n)
            .map(|i| VocabularyEntry::new(&format!("{prefix}-ko{i}"), &format!("{prefix}-si{i}")))
            .collect()
    }

    #[test]
    fn all_mode_concatenates_in_declaration_order() {
        let mut lessons = LessonSet::new();
        lessons.push_lesson("L1", words("a", 2));
        lessons.push_lesson("L2", words("b", 2));

        let active = select_active_set(&lessons, &ActiveMode::All).unwrap();
        let korean: Vec<&str> = active.iter().map(|e| e.korean.as_str()).collect();
        assert_eq!(korean, vec!["a-ko0", "a-ko1", "b-ko0", "b-ko1"]);
    }

    #[test]
    fn single_mode_returns_lesson_entries_verbatim() {
        let mut lessons = LessonSet::new();
        lessons.push_lesson("L1", words("a", 5));
        lessons.push_lesson("L2", words("b", 3));

        let active = select_active_set(&lessons, &ActiveMode::Single("L1".into())).unwrap();
        let lesson = &lessons.lesson("L1").unwrap().entries;
        assert_eq!(active.len(), 5);
        for (a, b) in active.iter().zip(lesson) {
            assert!(same_entry(a, b));
        }
    }

    #[test]
    fn single_mode_with_empty_key_is_missing_selection() {
        let mut lessons = LessonSet::new();
        lessons.push_lesson("L1", words("a", 5));
        assert_eq!(
            select_active_set(&lessons, &ActiveMode::Single(String::new())),
            Err(QuizError::MissingSelection)
        );
        assert_eq!(
            select_active_set(&lessons, &ActiveMode::Single("  ".into())),
            Err(QuizError::MissingSelection)
        );
    }

    #[test]
    fn single_mode_with_empty_lesson_is_empty_set() {
        let mut lessons = LessonSet::new();
        lessons.push_lesson("empty", Vec::new());
        let active = select_active_set(&lessons, &ActiveMode::Single("empty".into())).unwrap();
        assert!(active.is_empty());
    }

    #[test]
    fn single_mode_with_unknown_key_fails() {
        let lessons = LessonSet::new();
        assert_eq!(
            select_active_set(&lessons, &ActiveMode::Single("nope".into())),
            Err(QuizError::UnknownLesson("nope".into()))
        );
    }
}
