use std::rc::Rc;

/// Name given to the single lesson built from a flat word list.
pub const FLAT_LESSON_NAME: &str = "words";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub korean: String,
    pub sinhalese: String,
}

impl VocabularyEntry {
    pub fn new(korean: &str, sinhalese: &str) -> Self {
        Self {
            korean: korean.to_string(),
            sinhalese: sinhalese.to_string(),
        }
    }
}

/// Shared handle to a loaded entry. Identity (not field equality) tells two
/// entries apart, so the same word listed twice still counts as two entries.
pub type EntryRef = Rc<VocabularyEntry>;

pub fn same_entry(a: &EntryRef, b: &EntryRef) -> bool {
    Rc::ptr_eq(a, b)
}

#[derive(Clone, Debug)]
pub struct Lesson {
    pub name: String,
    pub entries: Vec<EntryRef>,
}

/// Lessons in the order they were declared in the source document.
#[derive(Clone, Debug, Default)]
pub struct LessonSet {
    lessons: Vec<Lesson>,
}

impl LessonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a lesson. A repeated name extends the existing lesson so
    /// lookups by name stay unambiguous.
    pub fn push_lesson(&mut self, name: &str, entries: Vec<VocabularyEntry>) {
        let entries = entries.into_iter().map(Rc::new);
        match self.lessons.iter_mut().find(|l| l.name == name) {
            Some(existing) => existing.entries.extend(entries),
            None => self.lessons.push(Lesson {
                name: name.to_string(),
                entries: entries.collect(),
            }),
        }
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson(&self, name: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.name == name)
    }

    pub fn lesson_names(&self) -> Vec<&str> {
        self.lessons.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn total_entries(&self) -> usize {
        self.lessons.iter().map(|l| l.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }

    /// Every entry, lesson-declaration order then item order.
    pub fn iter_entries(&self) -> impl Iterator<Item = &EntryRef> {
        self.lessons.iter().flat_map(|l| l.entries.iter())
    }
}
