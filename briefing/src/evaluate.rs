//! Show-if rule evaluation.
//!
//! A rule compares one previously given answer against a comparand. Items
//! without a rule are unconditionally visible; an unanswered prerequisite
//! hides the dependent item. Misconfigured rules (unknown operator, dangling
//! question reference) degrade to "not satisfied" and are reported, never
//! raised.

use briefing_types::{
    Answers, AnswerValue, Brief, ConditionValue, ConditionalLogic, Operator, QuestionId,
};
use tracing::warn;

/// A misconfigured visibility rule, found during evaluation or a brief audit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionIssue {
    /// The rule names an operator this engine does not implement.
    #[error("unknown operator `{operator}` in rule on question {question_id:?}")]
    UnknownOperator {
        question_id: Option<QuestionId>,
        operator: String,
    },

    /// The rule references a question that does not exist in the brief.
    #[error("rule references unknown question {question_id}")]
    DanglingReference { question_id: QuestionId },
}

/// Evaluate a visibility rule against the collected answers.
///
/// Pure decision: same `(condition, answers)` pair, same result, which is
/// what allows the resolver to recompute on every answer change. Rules with
/// an unknown operator evaluate to `false` and are logged.
pub fn evaluate(condition: Option<&ConditionalLogic>, answers: &Answers) -> bool {
    let mut issues = Vec::new();
    let satisfied = evaluate_reporting(condition, answers, &mut issues);
    for issue in &issues {
        warn!(%issue, "misconfigured visibility rule");
    }
    satisfied
}

/// Same decision as [`evaluate`], collecting issues instead of logging them.
pub fn evaluate_reporting(
    condition: Option<&ConditionalLogic>,
    answers: &Answers,
    issues: &mut Vec<ConditionIssue>,
) -> bool {
    let Some(rule) = condition.and_then(ConditionalLogic::rule) else {
        return true;
    };
    let Some(question_id) = rule.question_id() else {
        return true;
    };
    let Some(answer) = answers.get(question_id) else {
        return false;
    };
    if answer.is_blank() {
        return false;
    }

    let value = rule.value();
    match rule.operator() {
        Operator::Equals => scalar_equals(answer, value),
        Operator::NotEquals => !scalar_equals(answer, value),
        Operator::Contains => answer.contains_entry(&value.to_text()).unwrap_or(false),
        Operator::NotContains => answer
            .contains_entry(&value.to_text())
            .is_some_and(|contained| !contained),
        Operator::GreaterThan => compare(answer, value, |a, b| a > b),
        Operator::LessThan => compare(answer, value, |a, b| a < b),
        Operator::Other(name) => {
            issues.push(ConditionIssue::UnknownOperator {
                question_id: Some(question_id),
                operator: name.clone(),
            });
            false
        }
    }
}

/// Sweep a brief definition for misconfigured rules.
///
/// A dangling reference or unknown operator never fails a fill session (the
/// item just stays hidden); authoring surfaces call this to catch them early.
pub fn audit(brief: &Brief) -> Vec<ConditionIssue> {
    let mut issues = Vec::new();
    for step in brief.steps() {
        audit_condition(brief, step.conditional_logic(), &mut issues);
        for question in step.questions() {
            audit_condition(brief, question.conditional_logic(), &mut issues);
        }
    }
    for issue in &issues {
        warn!(%issue, "brief definition carries a misconfigured rule");
    }
    issues
}

fn audit_condition(
    brief: &Brief,
    condition: Option<&ConditionalLogic>,
    issues: &mut Vec<ConditionIssue>,
) {
    let Some(rule) = condition.and_then(ConditionalLogic::rule) else {
        return;
    };
    if let Operator::Other(name) = rule.operator() {
        issues.push(ConditionIssue::UnknownOperator {
            question_id: rule.question_id(),
            operator: name.clone(),
        });
    }
    if let Some(question_id) = rule.question_id()
        && brief.question(question_id).is_none()
    {
        issues.push(ConditionIssue::DanglingReference { question_id });
    }
}

/// Array answers are never equal to a scalar comparand; they must use the
/// containment operators.
fn scalar_equals(answer: &AnswerValue, value: &ConditionValue) -> bool {
    match answer.as_scalar_text() {
        Some(text) => text == value.to_text(),
        None => false,
    }
}

fn compare(answer: &AnswerValue, value: &ConditionValue, ordering: impl Fn(f64, f64) -> bool) -> bool {
    match (answer.as_number(), value.as_number()) {
        (Some(a), Some(b)) => ordering(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefing_types::{FileAttachment, ShowIf};

    fn rule(operator: &str, value: impl Into<ConditionValue>) -> ConditionalLogic {
        ConditionalLogic::show_if(ShowIf::new(
            7,
            Operator::from(operator.to_string()),
            value,
        ))
    }

    fn answered(value: impl Into<AnswerValue>) -> Answers {
        let mut answers = Answers::new();
        answers.set(7, value);
        answers
    }

    #[test]
    fn absent_condition_is_visible() {
        assert!(evaluate(None, &Answers::new()));
        assert!(evaluate(
            Some(&ConditionalLogic::unconditional()),
            &Answers::new()
        ));
    }

    #[test]
    fn unanswered_prerequisite_hides() {
        assert!(!evaluate(Some(&rule("equals", "yes")), &Answers::new()));
        assert!(!evaluate(Some(&rule("equals", "yes")), &answered("")));
    }

    #[test]
    fn equals_is_string_coerced() {
        assert!(evaluate(Some(&rule("equals", "yes")), &answered("yes")));
        assert!(!evaluate(Some(&rule("equals", "yes")), &answered("no")));
        assert!(evaluate(Some(&rule("equals", "5")), &answered(5.0)));
        assert!(evaluate(Some(&rule("equals", 5)), &answered("5")));
    }

    #[test]
    fn equals_never_matches_an_array_answer() {
        assert!(!evaluate(Some(&rule("equals", "a")), &answered(vec!["a"])));
        assert!(evaluate(Some(&rule("not_equals", "a")), &answered(vec!["a"])));
    }

    #[test]
    fn contains_requires_an_array() {
        assert!(evaluate(
            Some(&rule("contains", "red")),
            &answered(vec!["red", "blue"])
        ));
        assert!(!evaluate(
            Some(&rule("contains", "green")),
            &answered(vec!["red", "blue"])
        ));
        assert!(!evaluate(Some(&rule("contains", "red")), &answered("red")));
        assert!(!evaluate(Some(&rule("not_contains", "red")), &answered("red")));
    }

    #[test]
    fn file_answers_never_contain_a_scalar() {
        let files = answered(vec![FileAttachment::new("red", "/uploads/red")]);
        assert!(!evaluate(Some(&rule("contains", "red")), &files));
        assert!(evaluate(Some(&rule("not_contains", "red")), &files));
    }

    #[test]
    fn numeric_comparison_coerces_both_sides() {
        assert!(evaluate(Some(&rule("greater_than", 3)), &answered("5")));
        assert!(!evaluate(Some(&rule("greater_than", 3)), &answered("abc")));
        assert!(evaluate(Some(&rule("less_than", "10")), &answered(5.0)));
        assert!(!evaluate(Some(&rule("less_than", "abc")), &answered(5.0)));
    }

    #[test]
    fn unknown_operator_hides_and_reports() {
        let mut issues = Vec::new();
        let satisfied = evaluate_reporting(
            Some(&rule("matches_regex", "x")),
            &answered("x"),
            &mut issues,
        );
        assert!(!satisfied);
        assert_eq!(
            issues,
            vec![ConditionIssue::UnknownOperator {
                question_id: Some(QuestionId::new(7)),
                operator: "matches_regex".to_string(),
            }]
        );
    }

    #[test]
    fn audit_flags_dangling_references_and_unknown_operators() {
        use briefing_types::{Brief, Question, QuestionType, Step};

        let brief = Brief::new(1, "Test").with_steps(vec![
            Step::new(10, "One", 1).with_questions(vec![Question::new(
                100,
                "A",
                QuestionType::Text,
                1,
            )]),
            Step::new(20, "Two", 2)
                .with_condition(rule("equals", "yes"))
                .with_questions(vec![
                    Question::new(200, "B", QuestionType::Text, 1)
                        .with_condition(ConditionalLogic::show_if(ShowIf::new(
                            100,
                            Operator::from("matches_regex".to_string()),
                            "x",
                        ))),
                ]),
        ]);

        let issues = audit(&brief);
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&ConditionIssue::DanglingReference {
            question_id: QuestionId::new(7),
        }));
        assert!(issues.contains(&ConditionIssue::UnknownOperator {
            question_id: Some(QuestionId::new(100)),
            operator: "matches_regex".to_string(),
        }));
    }
}
