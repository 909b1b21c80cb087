//! Fill-session state: the current-step pointer, phase transitions, and the
//! submission gate.
//!
//! The pointer is held as a step identifier, never an index into the visible
//! list. Every answer mutation recomputes the visible set and re-derives the
//! pointer's position from it before the call returns, so navigation and
//! validation always observe the latest visibility.

use std::fmt;

use briefing_types::{
    Answers, AnswerValue, Brief, BriefId, Question, QuestionId, SessionId, Step, StepId,
    SubmissionId, SubmissionPayload,
};
use tracing::{debug, warn};

use crate::boundary::{BriefSource, SubmitTransport};
use crate::requirements;
use crate::visibility::VisibilityResolver;

/// Lifecycle phase of a fill session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting answers and navigation.
    Ready,

    /// A submission is in flight with the transport.
    Submitting,

    /// Delivered. Terminal; start a new session to fill again.
    Submitted,

    /// The transport refused or failed; `submit` may be retried.
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Brief could not be fetched from its source.
#[derive(Debug, thiserror::Error)]
#[error("failed to load brief: {0}")]
pub struct LoadError(#[source] pub anyhow::Error);

/// A refused navigation or answer call. Refusals change no session state.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Required visible questions on the current step are unanswered.
    #[error("{} required question(s) unanswered", .missing.len())]
    IncompleteStep { missing: Vec<QuestionId> },

    /// No visible step follows the current one.
    #[error("already at the last visible step")]
    AtLastStep,

    /// The session has been submitted; it no longer accepts changes.
    #[error("session is closed")]
    SessionClosed,
}

/// A refused or failed submission attempt.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Required visible questions on the final step are unanswered.
    #[error("{} required question(s) unanswered", .missing.len())]
    IncompleteStep { missing: Vec<QuestionId> },

    /// The current step is not the last visible step.
    #[error("not at the final visible step")]
    NotAtFinalStep,

    /// The session has already been submitted.
    #[error("session already submitted")]
    AlreadySubmitted,

    /// The transport reported a failure. The session stays retryable.
    #[error("submission transport failed: {0}")]
    Transport(#[source] anyhow::Error),
}

/// One respondent's fill attempt over a loaded brief.
///
/// Owns the answer map, the step pointer, and the lifecycle phase. The brief
/// definition is read-only for the lifetime of the session.
#[derive(Debug)]
pub struct Session {
    brief: Brief,
    session_id: SessionId,
    answers: Answers,
    resolver: VisibilityResolver,
    /// Visible step order as of the last recompute.
    visible: Vec<StepId>,
    /// Identity of the step being shown; `None` when nothing is visible.
    current: Option<StepId>,
    phase: Phase,
    /// Human-readable reason for the last transport failure, while `Failed`.
    failure: Option<String>,
    receipt: Option<SubmissionId>,
}

impl Session {
    /// Start a session over an already-loaded brief with a fresh token.
    pub fn new(brief: Brief) -> Self {
        Self::with_session_id(brief, SessionId::generate())
    }

    /// Start a session with an externally supplied token.
    pub fn with_session_id(brief: Brief, session_id: SessionId) -> Self {
        let mut session = Self {
            brief,
            session_id,
            answers: Answers::new(),
            resolver: VisibilityResolver::new(),
            visible: Vec::new(),
            current: None,
            phase: Phase::Ready,
            failure: None,
            receipt: None,
        };
        session.reconcile();
        session
    }

    /// Fetch a brief from `source` and start a session over it.
    pub fn load<S: BriefSource>(source: &S, brief_id: BriefId) -> Result<Self, LoadError> {
        let brief = source
            .load(brief_id)
            .map_err(|error| LoadError(error.into()))?;
        Ok(Self::new(brief))
    }

    /// Replace the visibility policy and recompute the visible set.
    pub fn with_resolver(mut self, resolver: VisibilityResolver) -> Self {
        self.resolver = resolver;
        self.reconcile();
        self
    }

    /// Get the brief being filled.
    pub fn brief(&self) -> &Brief {
        &self.brief
    }

    /// Get the fill-attempt token.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Get the lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get the collected answers.
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Get the receipt handed out by the transport, once submitted.
    pub fn submission_id(&self) -> Option<&SubmissionId> {
        self.receipt.as_ref()
    }

    /// Reason for the last transport failure, while the session is `Failed`.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// The currently shown step; `None` when nothing is visible.
    pub fn current_step(&self) -> Option<&Step> {
        self.current.and_then(|id| self.brief.step(id))
    }

    /// The visible steps in navigation order.
    pub fn visible_steps(&self) -> Vec<&Step> {
        self.visible
            .iter()
            .filter_map(|id| self.brief.step(*id))
            .collect()
    }

    /// Visible questions of the current step, in declared order.
    pub fn current_questions(&self) -> Vec<&Question> {
        let Some(step) = self.current_step() else {
            return Vec::new();
        };
        let scoped = self.resolver.scoped_answers(&self.brief, &self.answers);
        self.resolver.questions(step, &scoped)
    }

    /// One-based position of the current step within the visible order,
    /// paired with the visible total. `None` when nothing is visible.
    pub fn position(&self) -> Option<(usize, usize)> {
        let current = self.current?;
        let index = self.index_of(current)?;
        Some((index + 1, self.visible.len()))
    }

    /// Whether the current step is the last visible one.
    pub fn is_last_step(&self) -> bool {
        self.current.is_some() && self.current == self.visible.last().copied()
    }

    /// Record an answer, then recompute visibility and reconcile the pointer
    /// before returning.
    pub fn answer(
        &mut self,
        question: impl Into<QuestionId>,
        value: impl Into<AnswerValue>,
    ) -> Result<(), NavigationError> {
        self.ensure_open()?;
        self.answers.set(question, value);
        self.reconcile();
        Ok(())
    }

    /// Remove an answer, then recompute visibility and reconcile the pointer.
    pub fn clear_answer(&mut self, question: impl Into<QuestionId>) -> Result<(), NavigationError> {
        self.ensure_open()?;
        self.answers.remove(question);
        self.reconcile();
        Ok(())
    }

    /// Advance to the next visible step.
    ///
    /// Refused while any required visible question on the current step is
    /// unanswered; the refusal reports the offenders and changes nothing.
    pub fn next(&mut self) -> Result<(), NavigationError> {
        if self.phase == Phase::Submitted {
            return Err(NavigationError::SessionClosed);
        }
        let current = self.current.ok_or(NavigationError::AtLastStep)?;
        let missing = self.unmet_on(current);
        if !missing.is_empty() {
            return Err(NavigationError::IncompleteStep { missing });
        }
        let successor = self
            .index_of(current)
            .and_then(|index| self.visible.get(index + 1))
            .copied()
            .ok_or(NavigationError::AtLastStep)?;
        self.current = Some(successor);
        debug!(step = %successor, "advanced to next step");
        Ok(())
    }

    /// Move to the predecessor in the visible order. Never validates.
    /// Returns whether the pointer moved.
    pub fn prev(&mut self) -> bool {
        if self.phase == Phase::Submitted {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };
        let Some(index) = self.index_of(current) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        self.current = Some(self.visible[index - 1]);
        true
    }

    /// Validate the final step, hand the payload to `transport`, and settle
    /// the phase on its outcome.
    ///
    /// Only callable on the last visible step. The final step is re-checked
    /// here even if the caller already validated it: the visible set may have
    /// changed between render and click.
    pub fn submit<T: SubmitTransport>(
        &mut self,
        transport: &T,
    ) -> Result<SubmissionId, SubmitError> {
        if self.phase == Phase::Submitted {
            return Err(SubmitError::AlreadySubmitted);
        }
        if !self.is_last_step() {
            return Err(SubmitError::NotAtFinalStep);
        }
        let missing = self.current.map(|id| self.unmet_on(id)).unwrap_or_default();
        if !missing.is_empty() {
            return Err(SubmitError::IncompleteStep { missing });
        }

        self.phase = Phase::Submitting;
        match transport.submit(&self.payload()) {
            Ok(receipt) => {
                debug!(session = %self.session_id, receipt = %receipt, "submission delivered");
                self.phase = Phase::Submitted;
                self.failure = None;
                self.receipt = Some(receipt.clone());
                Ok(receipt)
            }
            Err(error) => {
                let error = error.into();
                warn!(session = %self.session_id, %error, "submission failed");
                self.phase = Phase::Failed;
                self.failure = Some(error.to_string());
                Err(SubmitError::Transport(error))
            }
        }
    }

    /// Assemble the payload for this session: brief identity, session token,
    /// and the entire retained answer map.
    pub fn payload(&self) -> SubmissionPayload {
        SubmissionPayload::new(
            self.brief.id(),
            self.session_id.clone(),
            self.answers.clone(),
        )
    }

    /// Recompute the visible step order and keep the pointer valid.
    ///
    /// The pointer survives any change that keeps its step visible. When its
    /// step disappears, the previous visible order is walked backwards from
    /// the vanished position; the first survivor becomes current, falling
    /// back to the first visible step. `None` iff nothing is visible.
    fn reconcile(&mut self) {
        let fresh: Vec<StepId> = self
            .resolver
            .steps(&self.brief, &self.answers)
            .iter()
            .map(|step| step.id())
            .collect();
        let previous = std::mem::replace(&mut self.visible, fresh);

        self.current = match self.current {
            Some(id) if self.visible.contains(&id) => Some(id),
            Some(id) => {
                let cut = previous
                    .iter()
                    .position(|step| *step == id)
                    .unwrap_or(previous.len());
                let fallback = previous[..cut]
                    .iter()
                    .rev()
                    .find(|step| self.visible.contains(*step))
                    .copied()
                    .or_else(|| self.visible.first().copied());
                debug!(vanished = %id, fallback = ?fallback, "current step hidden");
                fallback
            }
            None => self.visible.first().copied(),
        };
    }

    /// Edits after a failed delivery re-open the session.
    fn ensure_open(&mut self) -> Result<(), NavigationError> {
        match self.phase {
            Phase::Submitted => Err(NavigationError::SessionClosed),
            Phase::Failed => {
                self.phase = Phase::Ready;
                self.failure = None;
                Ok(())
            }
            Phase::Ready | Phase::Submitting => Ok(()),
        }
    }

    fn index_of(&self, id: StepId) -> Option<usize> {
        self.visible.iter().position(|step| *step == id)
    }

    fn unmet_on(&self, step_id: StepId) -> Vec<QuestionId> {
        let Some(step) = self.brief.step(step_id) else {
            return Vec::new();
        };
        let scoped = self.resolver.scoped_answers(&self.brief, &self.answers);
        // Visibility may be scoped; satisfaction always reads the raw map.
        requirements::unmet(self.resolver.questions(step, &scoped), &self.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefing_types::{ConditionalLogic, Operator, QuestionType, ShowIf};

    fn show_if_equals(question: u64, value: &str) -> ConditionalLogic {
        ConditionalLogic::show_if(ShowIf::new(question, Operator::Equals, value))
    }

    fn two_step_brief() -> Brief {
        Brief::new(1, "Gated").with_steps(vec![
            Step::new(10, "One", 1).with_questions(vec![
                Question::new(100, "Proceed?", QuestionType::SingleChoice, 1)
                    .with_options(["yes", "no"])
                    .required(),
            ]),
            Step::new(20, "Two", 2).with_condition(show_if_equals(100, "yes")),
        ])
    }

    #[test]
    fn starts_on_the_first_visible_step() {
        let session = Session::new(two_step_brief());
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.current_step().unwrap().id(), StepId::new(10));
        assert_eq!(session.position(), Some((1, 1)));
    }

    #[test]
    fn pointer_survives_unrelated_visibility_growth() {
        let mut session = Session::new(two_step_brief());
        session.answer(100, "yes").unwrap();
        assert_eq!(session.current_step().unwrap().id(), StepId::new(10));
        assert_eq!(session.position(), Some((1, 2)));
    }

    #[test]
    fn pointer_falls_back_when_its_step_hides() {
        let mut session = Session::new(two_step_brief());
        session.answer(100, "yes").unwrap();
        session.next().unwrap();
        assert_eq!(session.current_step().unwrap().id(), StepId::new(20));

        // Changing the gating answer hides the step the pointer is on.
        session.answer(100, "no").unwrap();
        assert_eq!(session.current_step().unwrap().id(), StepId::new(10));
    }

    #[test]
    fn next_is_gated_on_required_answers() {
        let mut session = Session::new(two_step_brief());
        let refused = session.next();
        assert!(matches!(
            refused,
            Err(NavigationError::IncompleteStep { ref missing }) if missing == &vec![QuestionId::new(100)]
        ));
        assert_eq!(session.current_step().unwrap().id(), StepId::new(10));

        session.answer(100, "yes").unwrap();
        session.next().unwrap();
        assert_eq!(session.current_step().unwrap().id(), StepId::new(20));
    }

    #[test]
    fn prev_never_validates_and_clamps_at_the_front() {
        let mut session = Session::new(two_step_brief());
        assert!(!session.prev());

        session.answer(100, "yes").unwrap();
        session.next().unwrap();
        assert!(session.prev());
        assert_eq!(session.current_step().unwrap().id(), StepId::new(10));
        assert!(!session.prev());
    }

    #[test]
    fn empty_visible_set_leaves_no_current_step() {
        let brief = Brief::new(1, "Hidden").with_steps(vec![
            Step::new(10, "Only", 1).with_condition(show_if_equals(999, "never")),
        ]);
        let session = Session::new(brief);
        assert!(session.current_step().is_none());
        assert_eq!(session.position(), None);
        assert_eq!(session.phase(), Phase::Ready);
    }
}
