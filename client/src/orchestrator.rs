//! Submission of analysis requests
//!
//! [`AnalysisSession`] holds the editable draft and the status of the latest
//! submission. [`RequestOrchestrator`] validates the draft, performs the
//! request and settles the session.
//!
//! Every submission is tagged with a generation number. A response is only
//! applied if its generation is still the session's latest; anything older
//! is discarded instead of overwriting newer state.

use spacerain_shared::{validate_draft, AnalysisResponse, RequestPayload, SessionDraft, ValidationError};

use crate::error::{ClientError, ClientResult};
use crate::external::AnalysisService;

/// Lifecycle of an analysis session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Settled outcome of a submission
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Result(AnalysisResponse),
    ErrorMessage(String),
}

/// Draft plus resolved state for one submission cycle
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub draft: SessionDraft,
    status: SessionStatus,
    resolution: Option<Resolution>,
    notice: Option<ValidationError>,
    generation: u64,
}

impl AnalysisSession {
    pub fn new(draft: SessionDraft) -> Self {
        Self {
            draft,
            status: SessionStatus::Idle,
            resolution: None,
            notice: None,
            generation: 0,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn result(&self) -> Option<&AnalysisResponse> {
        match &self.resolution {
            Some(Resolution::Result(response)) => Some(response),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.resolution {
            Some(Resolution::ErrorMessage(message)) => Some(message),
            _ => None,
        }
    }

    /// Validation notice from the last rejected submit attempt
    pub fn validation_notice(&self) -> Option<&ValidationError> {
        self.notice.as_ref()
    }

    /// Whether the submission control is enabled
    pub fn submit_enabled(&self) -> bool {
        self.status != SessionStatus::Loading
    }

    /// Return to idle, keeping the draft.
    ///
    /// A request still in flight will be discarded when it settles.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.status = SessionStatus::Idle;
        self.resolution = None;
        self.notice = None;
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(SessionDraft::default())
    }
}

/// A submission that has started and not yet settled
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub generation: u64,
    pub payload: RequestPayload,
}

/// Validates, sends and settles analysis requests
pub struct RequestOrchestrator<S: AnalysisService> {
    service: S,
}

impl<S: AnalysisService> RequestOrchestrator<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Start a submission.
    ///
    /// Fails without touching the status when the draft is not submittable
    /// (recording a validation notice) or a submission is already loading.
    pub fn begin(&self, session: &mut AnalysisSession) -> ClientResult<PendingSubmission> {
        if !session.submit_enabled() {
            return Err(ClientError::SubmissionInFlight);
        }

        let payload = match validate_draft(&session.draft) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "submission blocked by validation");
                session.notice = Some(e.clone());
                return Err(e.into());
            }
        };

        session.generation += 1;
        session.status = SessionStatus::Loading;
        session.resolution = None;
        session.notice = None;

        tracing::info!(
            generation = session.generation,
            date = %payload.date,
            time = %payload.time,
            lat = payload.lat,
            lon = payload.lon,
            conditions = payload.conditions.len(),
            "submitting analysis request"
        );

        Ok(PendingSubmission {
            generation: session.generation,
            payload,
        })
    }

    /// Apply the outcome of a submission.
    ///
    /// Returns false if the submission is stale and its outcome was dropped.
    pub fn settle(
        &self,
        session: &mut AnalysisSession,
        generation: u64,
        outcome: ClientResult<AnalysisResponse>,
    ) -> bool {
        let resolution = match outcome {
            Ok(response) => Resolution::Result(response),
            Err(e) => Resolution::ErrorMessage(e.to_string()),
        };
        self.resolve(session, generation, resolution)
    }

    /// Validate, send exactly one request and settle the session
    pub async fn submit(&self, session: &mut AnalysisSession) -> ClientResult<()> {
        let pending = self.begin(session)?;
        match self.service.calculate(&pending.payload).await {
            Ok(response) => {
                self.resolve(session, pending.generation, Resolution::Result(response));
                Ok(())
            }
            Err(e) => {
                self.resolve(session, pending.generation, Resolution::ErrorMessage(e.to_string()));
                Err(e)
            }
        }
    }

    fn resolve(&self, session: &mut AnalysisSession, generation: u64, resolution: Resolution) -> bool {
        if generation != session.generation {
            tracing::info!(generation, latest = session.generation, "discarding stale analysis response");
            return false;
        }

        session.status = match &resolution {
            Resolution::Result(response) => {
                tracing::info!(
                    generation,
                    location = %response.location,
                    conditions = response.probabilities.len(),
                    "analysis succeeded"
                );
                SessionStatus::Success
            }
            Resolution::ErrorMessage(message) => {
                tracing::error!(generation, error = %message, "analysis failed");
                SessionStatus::Error
            }
        };
        session.resolution = Some(resolution);
        true
    }
}
