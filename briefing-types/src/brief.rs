use serde::{Deserialize, Serialize};

use crate::{BriefId, ConditionalLogic, Question, QuestionId, StepId};

/// An ordered group of questions shown together, optionally conditional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    id: StepId,

    title: String,

    /// Canonical position within the brief. The resolver sorts by this value
    /// rather than trusting array position.
    order: i64,

    #[serde(default)]
    questions: Vec<Question>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    conditional_logic: Option<ConditionalLogic>,
}

impl Step {
    /// Create an empty, unconditional step.
    pub fn new(id: impl Into<StepId>, title: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order,
            questions: Vec::new(),
            conditional_logic: None,
        }
    }

    /// Set the step's questions.
    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    /// Attach a visibility condition.
    pub fn with_condition(mut self, condition: ConditionalLogic) -> Self {
        self.conditional_logic = Some(condition);
        self
    }

    /// Get the step identifier.
    pub fn id(&self) -> StepId {
        self.id
    }

    /// Get the step title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the canonical position within the brief.
    pub fn order(&self) -> i64 {
        self.order
    }

    /// Get the questions in declared order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Get the visibility condition, if any.
    pub fn conditional_logic(&self) -> Option<&ConditionalLogic> {
        self.conditional_logic.as_ref()
    }
}

/// The questionnaire definition: title, description, ordered steps.
///
/// Read-only for the engine for the lifetime of a fill session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brief {
    id: BriefId,

    title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(default)]
    steps: Vec<Step>,
}

impl Brief {
    /// Create a brief with no steps.
    pub fn new(id: impl Into<BriefId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            steps: Vec::new(),
        }
    }

    /// Set the description shown above the form.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the brief's steps.
    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    /// Get the brief identifier.
    pub fn id(&self) -> BriefId {
        self.id
    }

    /// Get the brief title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the steps in declared order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Look up a step by identifier.
    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.id() == id)
    }

    /// Look up a question anywhere in the brief.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions().find(|question| question.id() == id)
    }

    /// Iterate over every question in the brief, step by step.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.steps.iter().flat_map(|step| step.questions().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionType;

    #[test]
    fn cross_step_question_lookup() {
        let brief = Brief::new(1, "Test").with_steps(vec![
            Step::new(10, "One", 1).with_questions(vec![Question::new(
                100,
                "A",
                QuestionType::Text,
                1,
            )]),
            Step::new(20, "Two", 2).with_questions(vec![Question::new(
                200,
                "B",
                QuestionType::Text,
                1,
            )]),
        ]);

        assert_eq!(brief.question(QuestionId::new(200)).unwrap().text(), "B");
        assert!(brief.question(QuestionId::new(300)).is_none());
        assert_eq!(brief.questions().count(), 2);
    }

    #[test]
    fn deserializes_a_backend_payload() {
        let brief: Brief = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Website brief",
                "description": "Tell us about the project",
                "steps": [
                    {
                        "id": 10,
                        "title": "About you",
                        "order": 1,
                        "questions": [
                            {
                                "id": 100,
                                "text": "Company name",
                                "question_type": "text",
                                "is_required": true,
                                "order": 1
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(brief.title(), "Website brief");
        assert_eq!(brief.steps().len(), 1);
        assert!(brief.question(QuestionId::new(100)).unwrap().is_required());
    }
}
