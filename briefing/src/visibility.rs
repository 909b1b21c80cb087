//! Visible-set resolution over a brief's step/question tree.
//!
//! Both resolution functions run on every answer mutation, so they stay
//! linear in the size of the tree and carry no cache.

use std::borrow::Cow;
use std::collections::HashSet;

use briefing_types::{Answers, Brief, Question, QuestionId, Step};

use crate::evaluate::evaluate;

/// Which answers a visibility rule may see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerScope {
    /// Rules see the raw retained answer map, including answers whose own
    /// question is currently hidden. A dependent item can therefore stay
    /// visible after its source question's step is hidden by an unrelated
    /// change, as long as the stale answer remains in the map.
    #[default]
    Retained,

    /// Rules only see answers belonging to currently visible questions; the
    /// restriction is iterated to a fixpoint.
    VisibleOnly,
}

/// Computes the ordered visible subsequence of steps and questions.
///
/// The output is always a subsequence of the definition sorted by `order`
/// ascending, regardless of the array order steps were authored in.
#[derive(Debug, Clone, Default)]
pub struct VisibilityResolver {
    scope: AnswerScope,
}

impl VisibilityResolver {
    /// Create a resolver with the default [`AnswerScope::Retained`] policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer-scope policy.
    pub fn with_scope(mut self, scope: AnswerScope) -> Self {
        self.scope = scope;
        self
    }

    /// Get the answer-scope policy.
    pub fn scope(&self) -> AnswerScope {
        self.scope
    }

    /// Visible steps of the brief, sorted by `order` ascending.
    pub fn steps<'a>(&self, brief: &'a Brief, answers: &Answers) -> Vec<&'a Step> {
        let scoped = self.scoped_answers(brief, answers);
        visible_steps(brief, &scoped)
    }

    /// Visible questions of one step, sorted by `order` ascending.
    ///
    /// Rules are evaluated against `answers` as given; under
    /// [`AnswerScope::VisibleOnly`], pass [`Self::scoped_answers`] to keep
    /// the question set consistent with the step set.
    pub fn questions<'a>(&self, step: &'a Step, answers: &Answers) -> Vec<&'a Question> {
        visible_questions(step, answers)
    }

    /// The answer map rules are allowed to see under this resolver's scope.
    pub fn scoped_answers<'a>(&self, brief: &Brief, answers: &'a Answers) -> Cow<'a, Answers> {
        match self.scope {
            AnswerScope::Retained => Cow::Borrowed(answers),
            AnswerScope::VisibleOnly => Cow::Owned(restrict_to_visible(brief, answers)),
        }
    }
}

/// Steps and their questions as the respondent saw them, re-derived from a
/// stored answer map.
///
/// Reviewer surfaces use this to show only what was visible at fill time;
/// it works because submission payloads retain hidden answers.
pub fn visible_in_submission<'a>(
    brief: &'a Brief,
    answers: &Answers,
) -> Vec<(&'a Step, Vec<&'a Question>)> {
    visible_steps(brief, answers)
        .into_iter()
        .map(|step| (step, visible_questions(step, answers)))
        .collect()
}

fn visible_steps<'a>(brief: &'a Brief, answers: &Answers) -> Vec<&'a Step> {
    let mut steps: Vec<&Step> = brief
        .steps()
        .iter()
        .filter(|step| evaluate(step.conditional_logic(), answers))
        .collect();
    steps.sort_by_key(|step| step.order());
    steps
}

fn visible_questions<'a>(step: &'a Step, answers: &Answers) -> Vec<&'a Question> {
    let mut questions: Vec<&Question> = step
        .questions()
        .iter()
        .filter(|question| evaluate(question.conditional_logic(), answers))
        .collect();
    questions.sort_by_key(|question| question.order());
    questions
}

/// Restrict `answers` to questions that are visible when rules see only the
/// restricted map. Every rule needs its prerequisite answered, so dropping
/// an answer never reveals an item: the restriction shrinks monotonically
/// and the loop terminates.
fn restrict_to_visible(brief: &Brief, answers: &Answers) -> Answers {
    let mut current = answers.clone();
    loop {
        let mut visible: HashSet<QuestionId> = HashSet::new();
        for step in visible_steps(brief, &current) {
            for question in visible_questions(step, &current) {
                visible.insert(question.id());
            }
        }
        let next = current.restricted(&visible);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}
