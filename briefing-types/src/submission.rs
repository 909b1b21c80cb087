use serde::{Deserialize, Serialize};

use crate::{Answers, BriefId, SessionId};

/// The payload handed to the submission transport once a form is complete.
///
/// Carries the entire retained answer map: answers to questions hidden by a
/// later visibility change stay in, so reviewer surfaces can re-derive what
/// the respondent saw at fill time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    brief_id: BriefId,

    session_id: SessionId,

    answers_data: Answers,
}

impl SubmissionPayload {
    /// Assemble a payload from a finished session's parts.
    pub fn new(brief_id: BriefId, session_id: SessionId, answers_data: Answers) -> Self {
        Self {
            brief_id,
            session_id,
            answers_data,
        }
    }

    /// Get the brief this payload answers.
    pub fn brief_id(&self) -> BriefId {
        self.brief_id
    }

    /// Get the fill-attempt token.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Get the answer map.
    pub fn answers(&self) -> &Answers {
        &self.answers_data
    }

    /// Take the answer map out of the payload.
    pub fn into_answers(self) -> Answers {
        self.answers_data
    }
}
