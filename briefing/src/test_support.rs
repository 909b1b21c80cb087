//! In-memory collaborators for exercising the engine without a backend.
//!
//! `TestSource` serves briefs from a map, `TestTransport` records delivered
//! payloads and can be scripted to fail once, and `TestFileStore` mints
//! deterministic attachment paths.

use std::cell::RefCell;
use std::collections::HashMap;

use briefing_types::{Brief, BriefId, FileAttachment, SubmissionId, SubmissionPayload};

use crate::boundary::{BriefSource, FileStore, SubmitTransport};

/// Error type for the in-memory collaborators.
#[derive(Debug, thiserror::Error)]
pub enum TestCollaboratorError {
    #[error("no brief with id {0}")]
    UnknownBrief(BriefId),

    #[error("{0}")]
    Scripted(String),
}

/// A `BriefSource` backed by a map.
#[derive(Debug, Clone, Default)]
pub struct TestSource {
    briefs: HashMap<BriefId, Brief>,
}

impl TestSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            briefs: HashMap::new(),
        }
    }

    /// Add a brief, keyed by its own identifier.
    pub fn with_brief(mut self, brief: Brief) -> Self {
        self.briefs.insert(brief.id(), brief);
        self
    }
}

impl BriefSource for TestSource {
    type Error = TestCollaboratorError;

    fn load(&self, id: BriefId) -> Result<Brief, Self::Error> {
        self.briefs
            .get(&id)
            .cloned()
            .ok_or(TestCollaboratorError::UnknownBrief(id))
    }
}

/// A `SubmitTransport` that records payloads and can be scripted to fail.
#[derive(Debug, Default)]
pub struct TestTransport {
    delivered: RefCell<Vec<SubmissionPayload>>,
    fail_next: RefCell<Option<String>>,
}

impl TestTransport {
    /// Create a transport that accepts every submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `submit` call fail with `reason`. The failure is
    /// consumed; the call after it succeeds.
    pub fn failing_once(self, reason: impl Into<String>) -> Self {
        *self.fail_next.borrow_mut() = Some(reason.into());
        self
    }

    /// Payloads delivered so far.
    pub fn delivered(&self) -> Vec<SubmissionPayload> {
        self.delivered.borrow().clone()
    }
}

impl SubmitTransport for TestTransport {
    type Error = TestCollaboratorError;

    fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionId, Self::Error> {
        if let Some(reason) = self.fail_next.borrow_mut().take() {
            return Err(TestCollaboratorError::Scripted(reason));
        }
        let mut delivered = self.delivered.borrow_mut();
        delivered.push(payload.clone());
        Ok(SubmissionId::new(format!("submission-{}", delivered.len())))
    }
}

/// A `FileStore` minting deterministic paths under `/uploads`.
#[derive(Debug, Clone, Default)]
pub struct TestFileStore;

impl TestFileStore {
    /// Create the store.
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for TestFileStore {
    type Error = std::convert::Infallible;

    fn store(&self, name: &str, _bytes: &[u8]) -> Result<FileAttachment, Self::Error> {
        Ok(FileAttachment::new(name, format!("/uploads/{name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_misses_report_the_id() {
        let source = TestSource::new();
        let error = source.load(BriefId::new(9)).unwrap_err();
        assert!(matches!(error, TestCollaboratorError::UnknownBrief(id) if id == BriefId::new(9)));
    }

    #[test]
    fn scripted_failure_is_consumed() {
        use briefing_types::{Answers, SessionId};

        let transport = TestTransport::new().failing_once("gateway timeout");
        let payload =
            SubmissionPayload::new(BriefId::new(1), SessionId::new("s"), Answers::new());

        assert!(transport.submit(&payload).is_err());
        assert!(transport.submit(&payload).is_ok());
        assert_eq!(transport.delivered().len(), 1);
    }

    #[test]
    fn file_store_mints_served_paths() {
        let store = TestFileStore::new();
        let attachment = store.store("logo.png", b"bytes").unwrap();
        assert_eq!(attachment.name, "logo.png");
        assert_eq!(attachment.path, "/uploads/logo.png");
    }
}
