use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A file uploaded for a `file` question.
///
/// The upload itself happens outside the engine; the store hands back the
/// path the file is served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Original file name as picked by the respondent.
    pub name: String,

    /// Path the stored file is served from.
    pub path: String,
}

impl FileAttachment {
    /// Create an attachment entry.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A single collected answer.
///
/// The shape depends on the question type: scalar for text, number, date,
/// single-choice and linear-scale questions; a list for multi-choice and
/// file questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Free text, dates, and single-choice picks.
    Text(String),

    /// Numeric input and linear-scale picks.
    Number(f64),

    /// Multi-choice selections.
    Selection(Vec<String>),

    /// Uploaded files.
    Files(Vec<FileAttachment>),
}

impl AnswerValue {
    /// Get the variant name of this value for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Number(_) => "Number",
            Self::Selection(_) => "Selection",
            Self::Files(_) => "Files",
        }
    }

    /// String form of a scalar value; `None` for list values.
    ///
    /// Numbers print without a trailing `.0` so that `5` and `"5"` compare
    /// equal under the equality operators.
    pub fn as_scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
            Self::Selection(_) | Self::Files(_) => None,
        }
    }

    /// Numeric form of a scalar value; `None` for list values and for text
    /// that does not parse as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Selection(_) | Self::Files(_) => None,
        }
    }

    /// Whether this is one of the list-shaped variants.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::Selection(_) | Self::Files(_))
    }

    /// Number of entries for list values; `None` for scalars.
    pub fn list_len(&self) -> Option<usize> {
        match self {
            Self::Selection(items) => Some(items.len()),
            Self::Files(files) => Some(files.len()),
            Self::Text(_) | Self::Number(_) => None,
        }
    }

    /// Element-wise containment for list values; `None` for scalars.
    ///
    /// File entries never match a scalar comparand.
    pub fn contains_entry(&self, needle: &str) -> Option<bool> {
        match self {
            Self::Selection(items) => Some(items.iter().any(|item| item == needle)),
            Self::Files(_) => Some(false),
            Self::Text(_) | Self::Number(_) => None,
        }
    }

    /// Whether this is an empty text value, which counts as unanswered.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Try to get this value as a selection list.
    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            Self::Selection(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as a file list.
    pub fn as_files(&self) -> Option<&[FileAttachment]> {
        match self {
            Self::Files(files) => Some(files),
            _ => None,
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        Self::Selection(items)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        Self::Selection(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<FileAttachment>> for AnswerValue {
    fn from(files: Vec<FileAttachment>) -> Self {
        Self::Files(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_text_coercion() {
        assert_eq!(
            AnswerValue::from("yes").as_scalar_text().unwrap(),
            Cow::Borrowed("yes")
        );
        assert_eq!(AnswerValue::from(5.0).as_scalar_text().unwrap(), "5");
        assert_eq!(AnswerValue::from(5.5).as_scalar_text().unwrap(), "5.5");
        assert!(AnswerValue::from(vec!["a"]).as_scalar_text().is_none());
    }

    #[test]
    fn number_coercion() {
        assert_eq!(AnswerValue::from("5").as_number(), Some(5.0));
        assert_eq!(AnswerValue::from(" 5.5 ").as_number(), Some(5.5));
        assert_eq!(AnswerValue::from("abc").as_number(), None);
        assert_eq!(AnswerValue::from(vec!["5"]).as_number(), None);
    }

    #[test]
    fn containment() {
        let selection = AnswerValue::from(vec!["red", "blue"]);
        assert_eq!(selection.contains_entry("red"), Some(true));
        assert_eq!(selection.contains_entry("green"), Some(false));

        let files = AnswerValue::from(vec![FileAttachment::new("a.png", "/uploads/a.png")]);
        assert_eq!(files.contains_entry("a.png"), Some(false));

        assert_eq!(AnswerValue::from("red").contains_entry("red"), None);
    }

    #[test]
    fn shape_accessors() {
        let selection = AnswerValue::from(vec!["a"]);
        assert!(selection.is_list());
        assert_eq!(selection.as_selection(), Some(&["a".to_string()][..]));
        assert_eq!(selection.as_files(), None);
        assert_eq!(selection.type_name(), "Selection");

        let files = AnswerValue::from(vec![FileAttachment::new("a.png", "/uploads/a.png")]);
        assert_eq!(files.as_files().unwrap().len(), 1);
        assert!(!AnswerValue::from("x").is_list());
    }

    #[test]
    fn blankness() {
        assert!(AnswerValue::from("").is_blank());
        assert!(!AnswerValue::from("x").is_blank());
        assert!(!AnswerValue::from(Vec::<String>::new()).is_blank());
    }

    #[test]
    fn untagged_wire_shapes() {
        let text: AnswerValue = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(text, AnswerValue::from("hello"));

        let number: AnswerValue = serde_json::from_str("7").unwrap();
        assert_eq!(number, AnswerValue::from(7.0));

        let selection: AnswerValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(selection, AnswerValue::from(vec!["a", "b"]));

        let files: AnswerValue =
            serde_json::from_str("[{\"name\":\"a.png\",\"path\":\"/uploads/a.png\"}]").unwrap();
        assert_eq!(
            files,
            AnswerValue::from(vec![FileAttachment::new("a.png", "/uploads/a.png")])
        );
    }
}
