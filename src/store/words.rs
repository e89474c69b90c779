use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use icu_normalizer::ComposingNormalizerBorrowed;
use rust_embed::Embed;

use crate::engine::QuizError;
use crate::store::schema::{WordRecord, WordsDocument};
use crate::vocab::{FLAT_LESSON_NAME, LessonSet, VocabularyEntry};

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordAssets;

const BUNDLED_WORDS: &str = "default.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordSource {
    Bundled,
    Path(PathBuf),
    Url(String),
}

impl WordSource {
    /// `""` or `"bundled"` selects the built-in list, `http(s)://` a URL,
    /// anything else a file path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "bundled" {
            WordSource::Bundled
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            WordSource::Url(raw.to_string())
        } else {
            WordSource::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordSource::Bundled => write!(f, "bundled word list"),
            WordSource::Path(path) => write!(f, "{}", path.display()),
            WordSource::Url(url) => write!(f, "{url}"),
        }
    }
}

pub fn load_words(source: &WordSource) -> Result<LessonSet, QuizError> {
    let loaded = read_source(source).and_then(|json| parse_words(&json));
    match loaded {
        Ok(lessons) => {
            tracing::info!(
                source = %source,
                lessons = lessons.lessons().len(),
                words = lessons.total_entries(),
                "loaded vocabulary"
            );
            Ok(lessons)
        }
        Err(err) => {
            tracing::error!(source = %source, "error fetching words: {err:#}");
            Err(QuizError::DataLoad {
                origin: source.to_string(),
                reason: format!("{err:#}"),
            })
        }
    }
}

fn read_source(source: &WordSource) -> Result<String> {
    match source {
        WordSource::Bundled => {
            let file = WordAssets::get(BUNDLED_WORDS).context("bundled word list is missing")?;
            String::from_utf8(file.data.into_owned()).context("bundled word list is not UTF-8")
        }
        WordSource::Path(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        WordSource::Url(url) => fetch_url(url),
    }
}

#[cfg(feature = "network")]
fn fetch_url(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()?;
    Ok(response.text()?)
}

#[cfg(not(feature = "network"))]
fn fetch_url(url: &str) -> Result<String> {
    anyhow::bail!("built without network support, cannot fetch {url}")
}

pub fn parse_words(json: &str) -> Result<LessonSet> {
    let document = WordsDocument::parse(json)?;
    let records = document.word_count();
    let mut lessons = LessonSet::new();
    match document {
        WordsDocument::Flat(records) => {
            lessons.push_lesson(FLAT_LESSON_NAME, clean_records(FLAT_LESSON_NAME, records));
        }
        WordsDocument::Lessons(named) => {
            for (name, records) in named {
                let entries = clean_records(&name, records);
                lessons.push_lesson(&name, entries);
            }
        }
    }
    let skipped = records - lessons.total_entries();
    if skipped > 0 {
        tracing::warn!(skipped, kept = lessons.total_entries(), "dropped incomplete words");
    }
    Ok(lessons)
}

fn clean_records(lesson: &str, records: Vec<WordRecord>) -> Vec<VocabularyEntry> {
    records
        .into_iter()
        .filter_map(|record| {
            let korean = normalize_text(&record.korean);
            let sinhalese = normalize_text(&record.sinhalese);
            if korean.is_empty() || sinhalese.is_empty() {
                tracing::warn!(lesson, ?record, "skipping word with an empty side");
                return None;
            }
            Some(VocabularyEntry { korean, sinhalese })
        })
        .collect()
}

/// Trims and composes to NFC so that visually identical answers compare
/// equal regardless of how the file was typed.
pub fn normalize_text(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(text.trim())
        .into_owned()
}
