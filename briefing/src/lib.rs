//! # briefing
//!
//! Visibility and navigation engine for multi-step questionnaire ("brief")
//! forms. An admin authors a tree of steps and questions, each optionally
//! carrying a "show only if a prior answer matches" rule; respondents fill
//! the form step by step. This crate decides which steps and questions are
//! currently visible, keeps the current-step pointer stable while the
//! visible set changes under every answer, gates forward navigation and
//! submission on required-question completeness, and assembles the final
//! payload.
//!
//! Fetching definitions, delivering submissions, and storing uploads are
//! collaborator seams (see [`boundary`]); the engine itself performs no I/O.
//!
//! ## Usage
//!
//! ```
//! use briefing::{
//!     Brief, ConditionalLogic, Operator, Question, QuestionType, Session, ShowIf, Step,
//!     TestTransport,
//! };
//!
//! let brief = Brief::new(1, "Website brief").with_steps(vec![
//!     Step::new(10, "About the project", 1).with_questions(vec![
//!         Question::new(100, "Do you have an existing site?", QuestionType::SingleChoice, 1)
//!             .with_options(["yes", "no"])
//!             .required(),
//!     ]),
//!     Step::new(20, "Current site", 2)
//!         .with_condition(ConditionalLogic::show_if(ShowIf::new(100, Operator::Equals, "yes"))),
//! ]);
//!
//! let mut session = Session::new(brief);
//! assert_eq!(session.visible_steps().len(), 1);
//!
//! session.answer(100, "yes").unwrap();
//! assert_eq!(session.visible_steps().len(), 2);
//! assert!(!session.is_last_step());
//!
//! session.next().unwrap();
//! let receipt = session.submit(&TestTransport::new()).unwrap();
//! assert!(!receipt.as_str().is_empty());
//! ```

// Re-export all types from briefing-types
pub use briefing_types::*;

mod evaluate;
pub use evaluate::{ConditionIssue, audit, evaluate, evaluate_reporting};

mod visibility;
pub use visibility::{AnswerScope, VisibilityResolver, visible_in_submission};

mod requirements;
pub use requirements::{all_satisfied, is_satisfied, unmet};

mod boundary;
pub use boundary::{BriefSource, FileStore, SubmitTransport};

mod session;
pub use session::{LoadError, NavigationError, Phase, Session, SubmitError};

// In-memory collaborators for testing engine integrations
mod test_support;
pub use test_support::{TestCollaboratorError, TestFileStore, TestSource, TestTransport};
