//! Required-question completion checks, shared by forward navigation and the
//! submission gate.

use briefing_types::{Answers, AnswerValue, Question, QuestionId, QuestionType};

/// Whether a question blocks progress.
///
/// Non-required questions never block. Required scalar questions need a
/// present, non-blank answer; required list questions need an answer with at
/// least one entry.
pub fn is_satisfied(question: &Question, answers: &Answers) -> bool {
    if !question.is_required() {
        return true;
    }
    match question.question_type() {
        QuestionType::Text
        | QuestionType::Number
        | QuestionType::Date
        | QuestionType::SingleChoice
        | QuestionType::LinearScale => answers.has_value(question.id()),
        QuestionType::MultiChoice | QuestionType::File => answers
            .get(question.id())
            .and_then(AnswerValue::list_len)
            .is_some_and(|len| len > 0),
    }
}

/// Identifiers of required questions still missing a satisfying answer.
pub fn unmet<'a>(
    questions: impl IntoIterator<Item = &'a Question>,
    answers: &Answers,
) -> Vec<QuestionId> {
    questions
        .into_iter()
        .filter(|question| !is_satisfied(question, answers))
        .map(|question| question.id())
        .collect()
}

/// Conjunction of [`is_satisfied`] over a question sequence.
pub fn all_satisfied<'a>(
    questions: impl IntoIterator<Item = &'a Question>,
    answers: &Answers,
) -> bool {
    questions
        .into_iter()
        .all(|question| is_satisfied(question, answers))
}
