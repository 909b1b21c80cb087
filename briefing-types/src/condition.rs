use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QuestionId;

/// Visibility rule attached to a step or question.
///
/// Wire shape: `{"show_if": {"question_id": 7, "operator": "equals",
/// "value": "yes"}}`. An object without a `show_if` rule gates nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalLogic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    show_if: Option<ShowIf>,
}

impl ConditionalLogic {
    /// A rule that shows the item only when `rule` matches.
    pub fn show_if(rule: ShowIf) -> Self {
        Self {
            show_if: Some(rule),
        }
    }

    /// An empty condition object; the item is unconditionally visible.
    pub fn unconditional() -> Self {
        Self { show_if: None }
    }

    /// Get the show-if rule, if one is present.
    pub fn rule(&self) -> Option<&ShowIf> {
        self.show_if.as_ref()
    }
}

/// A single comparison against a previously given answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowIf {
    /// The question whose answer gates visibility. Authoring surfaces may
    /// save rules before picking one; a null reference gates nothing.
    #[serde(default)]
    question_id: Option<QuestionId>,

    operator: Operator,

    value: ConditionValue,
}

impl ShowIf {
    /// Create a rule comparing the answer of `question_id` against `value`.
    pub fn new(
        question_id: impl Into<QuestionId>,
        operator: Operator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            question_id: Some(question_id.into()),
            operator,
            value: value.into(),
        }
    }

    /// The referenced question, if the rule is bound to one.
    pub fn question_id(&self) -> Option<QuestionId> {
        self.question_id
    }

    /// The comparison operator.
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// The comparand.
    pub fn value(&self) -> &ConditionValue {
        &self.value
    }
}

/// Comparison operator of a show-if rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,

    /// An operator this engine does not implement. Preserved verbatim so a
    /// misconfigured rule can be reported instead of failing at load time.
    Other(String),
}

impl Operator {
    /// The wire name of this operator.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        match name.as_str() {
            "equals" => Self::Equals,
            "not_equals" => Self::NotEquals,
            "contains" => Self::Contains,
            "not_contains" => Self::NotContains,
            "greater_than" => Self::GreaterThan,
            "less_than" => Self::LessThan,
            _ => Self::Other(name),
        }
    }
}

impl From<Operator> for String {
    fn from(operator: Operator) -> Self {
        operator.as_str().to_string()
    }
}

/// The comparand of a show-if rule; the wire carries either a string or a
/// number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Text(String),
    Number(f64),
}

impl ConditionValue {
    /// String form used by the equality and containment operators.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// Numeric form used by the ordering operators; `None` for text that
    /// does not parse as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for ConditionValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for ConditionValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}
