//! Core types for the briefing crate.
//!
//! This crate provides the foundational types for multi-step questionnaire
//! ("brief") forms:
//! - `Brief`, `Step`, `Question` - The definition tree an admin authors
//! - `ConditionalLogic`, `ShowIf`, `Operator` - Show-if visibility rules
//! - `AnswerValue` and `Answers` - Collected data, keyed by question id
//! - `SubmissionPayload` - The wire shape handed to the submission transport
//!
//! Everything here is presentation-agnostic and serde-enabled: definitions
//! arrive as JSON from an external backend, payloads leave the same way.

mod ids;
pub use ids::{BriefId, QuestionId, SessionId, StepId, SubmissionId};

mod answer;
pub use answer::{AnswerValue, FileAttachment};

mod answers;
pub use answers::Answers;

mod condition;
pub use condition::{ConditionValue, ConditionalLogic, Operator, ShowIf};

mod question;
pub use question::{Question, QuestionType};

mod brief;
pub use brief::{Brief, Step};

mod submission;
pub use submission::SubmissionPayload;
