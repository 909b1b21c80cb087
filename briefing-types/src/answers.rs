use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, QuestionId};

/// Collected answers for one fill session, keyed by question identifier.
///
/// Insertion order is irrelevant; keys are unique per question. Answers are
/// retained even when a later visibility change hides their question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: HashMap<QuestionId, AnswerValue>,
}

impl Answers {
    /// Create an empty answer map.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Record the answer for a question, replacing any previous one.
    pub fn set(&mut self, question: impl Into<QuestionId>, value: impl Into<AnswerValue>) {
        self.values.insert(question.into(), value.into());
    }

    /// Get the answer for a question.
    pub fn get(&self, question: impl Into<QuestionId>) -> Option<&AnswerValue> {
        self.values.get(&question.into())
    }

    /// Remove the answer for a question.
    pub fn remove(&mut self, question: impl Into<QuestionId>) -> Option<AnswerValue> {
        self.values.remove(&question.into())
    }

    /// Check if any answer is recorded for a question.
    pub fn contains(&self, question: impl Into<QuestionId>) -> bool {
        self.values.contains_key(&question.into())
    }

    /// Whether the question has been explicitly answered: an entry exists and
    /// is not an empty text value.
    pub fn has_value(&self, question: impl Into<QuestionId>) -> bool {
        self.values
            .get(&question.into())
            .is_some_and(|value| !value.is_blank())
    }

    /// Get an iterator over all question-answer pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of recorded answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no answers are recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A copy containing only the answers for the given questions.
    pub fn restricted(&self, keep: &HashSet<QuestionId>) -> Self {
        self.values
            .iter()
            .filter(|(id, _)| keep.contains(id))
            .map(|(id, value)| (*id, value.clone()))
            .collect()
    }
}

impl IntoIterator for Answers {
    type Item = (QuestionId, AnswerValue);
    type IntoIter = std::collections::hash_map::IntoIter<QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a QuestionId, &'a AnswerValue);
    type IntoIter = std::collections::hash_map::Iter<'a, QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(QuestionId, AnswerValue)> for Answers {
    fn from_iter<I: IntoIterator<Item = (QuestionId, AnswerValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut answers = Answers::new();
        answers.set(1, "yes");
        answers.set(2, 5.0);

        assert_eq!(answers.get(1), Some(&AnswerValue::from("yes")));
        assert_eq!(answers.get(2), Some(&AnswerValue::from(5.0)));
        assert_eq!(answers.get(3), None);
    }

    #[test]
    fn has_value_treats_blank_text_as_unanswered() {
        let mut answers = Answers::new();
        answers.set(1, "");
        answers.set(2, "x");

        assert!(!answers.has_value(1));
        assert!(answers.has_value(2));
        assert!(!answers.has_value(3));
    }

    #[test]
    fn restricted_keeps_only_listed_questions() {
        let mut answers = Answers::new();
        answers.set(1, "a");
        answers.set(2, "b");

        let keep = HashSet::from([QuestionId::new(1)]);
        let restricted = answers.restricted(&keep);
        assert_eq!(restricted.len(), 1);
        assert!(restricted.contains(1));
        assert!(!restricted.contains(2));
    }

    #[test]
    fn survives_json_round_trip() {
        let mut answers = Answers::new();
        answers.set(1, "yes");
        answers.set(2, vec!["red", "blue"]);

        let json = serde_json::to_string(&answers).unwrap();
        let parsed: Answers = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, answers);
    }
}
