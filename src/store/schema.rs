use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub korean: String,
    pub sinhalese: String,
}

/// The two shapes a words file has taken: a bare list, or lessons keyed by
/// name. Lesson order follows the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordsDocument {
    Flat(Vec<WordRecord>),
    Lessons(Vec<(String, Vec<WordRecord>)>),
}

impl WordsDocument {
    pub fn parse(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("words file is not valid JSON")?;
        match value {
            Value::Array(_) => {
                let records: Vec<WordRecord> =
                    serde_json::from_value(value).context("malformed word list")?;
                Ok(WordsDocument::Flat(records))
            }
            Value::Object(map) => {
                let mut lessons = Vec::with_capacity(map.len());
                for (name, entries) in map {
                    let records: Vec<WordRecord> = serde_json::from_value(entries)
                        .with_context(|| format!("malformed lesson '{name}'"))?;
                    lessons.push((name, records));
                }
                Ok(WordsDocument::Lessons(lessons))
            }
            other => bail!(
                "expected a list of words or an object of lessons, found {}",
                value_kind(&other)
            ),
        }
    }

    pub fn word_count(&self) -> usize {
        match self {
            WordsDocument::Flat(records) => records.len(),
            WordsDocument::Lessons(lessons) => lessons.iter().map(|(_, r)| r.len()).sum(),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_list() {
        let doc = WordsDocument::parse(r#"[{"korean":"물","sinhalese":"වතුර"}]"#).unwrap();
        assert_eq!(
            doc,
            WordsDocument::Flat(vec![WordRecord {
                korean: "물".into(),
                sinhalese: "වතුර".into()
            }])
        );
    }

    #[test]
    fn lessons_keep_document_order() {
        let json = r#"{
            "zeta": [{"korean":"가","sinhalese":"ක"}],
            "alpha": [{"korean":"나","sinhalese":"න"}],
            "mid": []
        }"#;
        let WordsDocument::Lessons(lessons) = WordsDocument::parse(json).unwrap() else {
            panic!("expected lessons");
        };
        let names: Vec<&str> = lessons.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let doc =
            WordsDocument::parse(r#"[{"korean":"물","sinhalese":"වතුර","note":"noun"}]"#).unwrap();
        assert_eq!(doc.word_count(), 1);
    }

    #[test]
    fn rejects_scalar_document() {
        let err = WordsDocument::parse("42").unwrap_err();
        assert!(err.to_string().contains("a number"));
    }

    #[test]
    fn rejects_lesson_with_missing_field() {
        let err = WordsDocument::parse(r#"{"L1":[{"korean":"물"}]}"#).unwrap_err();
        assert!(format!("{err:#}").contains("L1"));
    }
}
