use serde::{Deserialize, Serialize};

use crate::{ConditionalLogic, QuestionId};

/// A single input item within a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,

    /// The prompt text shown to the respondent.
    text: String,

    question_type: QuestionType,

    /// Option labels for choice and scale questions; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,

    #[serde(default)]
    is_required: bool,

    /// Canonical position within the step.
    order: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    conditional_logic: Option<ConditionalLogic>,
}

impl Question {
    /// Create a question with no options, not required, unconditional.
    pub fn new(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        question_type: QuestionType,
        order: i64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            question_type,
            options: Vec::new(),
            is_required: false,
            order,
            conditional_logic: None,
        }
    }

    /// Set the option labels.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Attach a visibility condition.
    pub fn with_condition(mut self, condition: ConditionalLogic) -> Self {
        self.conditional_logic = Some(condition);
        self
    }

    /// Get the question identifier.
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Get the prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the question type.
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// Get the option labels.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Whether an answer is required to pass this question.
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Get the canonical position within the step.
    pub fn order(&self) -> i64 {
        self.order
    }

    /// Get the visibility condition, if any.
    pub fn conditional_logic(&self) -> Option<&ConditionalLogic> {
        self.conditional_logic.as_ref()
    }
}

/// The input type of a question, fixed at authoring time.
///
/// The set is closed so that "what counts as answered" is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Single-line or multi-line free text.
    Text,

    /// Numeric input.
    Number,

    /// Calendar date.
    Date,

    /// Pick one option.
    SingleChoice,

    /// Pick any number of options.
    MultiChoice,

    /// Pick a point on a numeric scale.
    LinearScale,

    /// Upload one or more files.
    File,
}

impl QuestionType {
    /// Whether answers to this type are collected as a list.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Self::MultiChoice | Self::File)
    }

    /// Whether the question carries an options list.
    pub fn uses_options(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice | Self::LinearScale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&QuestionType::SingleChoice).unwrap(),
            "\"single_choice\""
        );
        let parsed: QuestionType = serde_json::from_str("\"linear_scale\"").unwrap();
        assert_eq!(parsed, QuestionType::LinearScale);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result: Result<QuestionType, _> = serde_json::from_str("\"hologram\"");
        assert!(result.is_err());
    }

    #[test]
    fn builder_round_trip() {
        let question = Question::new(1, "Pick a color", QuestionType::MultiChoice, 2)
            .with_options(["red", "blue"])
            .required();

        assert_eq!(question.id(), QuestionId::new(1));
        assert_eq!(question.options(), ["red", "blue"]);
        assert!(question.is_required());
        assert!(question.question_type().is_multi_valued());
        assert!(question.question_type().uses_options());
        assert!(!QuestionType::Text.uses_options());
    }
}
