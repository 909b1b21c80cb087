//! Collaborator seams for the work the engine does not do itself.
//!
//! Loading a brief definition, delivering a finished submission, and storing
//! an uploaded file all happen outside the engine. Each call is single-shot
//! with two outcomes: a success value or a failure reason.

use briefing_types::{Brief, BriefId, FileAttachment, SubmissionId, SubmissionPayload};

/// Fetches brief definitions.
pub trait BriefSource {
    /// The error type for this source.
    type Error: Into<anyhow::Error>;

    /// Fetch the definition for `id`.
    fn load(&self, id: BriefId) -> Result<Brief, Self::Error>;
}

/// Delivers finished submissions.
pub trait SubmitTransport {
    /// The error type for this transport.
    type Error: Into<anyhow::Error>;

    /// Deliver `payload`, returning the receipt identifier.
    fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionId, Self::Error>;
}

/// Stores an uploaded file and mints the answer entry for it.
///
/// The engine never touches file bytes beyond this seam; the returned
/// attachment is pushed into the relevant `Files` answer.
pub trait FileStore {
    /// The error type for this store.
    type Error: Into<anyhow::Error>;

    /// Store `bytes` under `name`, returning where the file is served from.
    fn store(&self, name: &str, bytes: &[u8]) -> Result<FileAttachment, Self::Error>;
}
