use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde_json::Value;
use shared::{
    domain::{AnalysisOutcome, RequestState, SelectedFile, UploadParameters},
    error::{RequestError, UnexpectedResponse},
    protocol::{
        response_status, server_error_message, AnalyzeDoneResponse, ANALYZE_PATH,
        FIELD_CONFIDENCE, FIELD_DROP_VOLUME_UL, FIELD_FILE, FIELD_FPS, FIELD_MAX_FRAMES,
        FIELD_MICRONS_PER_PIXEL, FIELD_WEIGHTS, STATUS_DONE,
    },
};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::gate::SubmissionGate;

/// Status and body of a response that made it back from the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one analysis request. `Err` means no response was received.
#[async_trait]
pub trait AnalysisEndpoint: Send + Sync {
    async fn post_analysis(&self, params: UploadParameters) -> Result<RawResponse, RequestError>;
}

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("server url '{0}' cannot be used as a base")]
    NotABase(String),
}

/// Multipart POST to `<server>/analyze` over reqwest.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    http: Client,
    base_url: Url,
    analyze_url: Url,
}

impl HttpEndpoint {
    pub fn new(server_url: &str) -> Result<Self, EndpointError> {
        // No timeout: an endpoint that never answers keeps the request pending.
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, EndpointError> {
        let invalid = |source: url::ParseError| EndpointError::InvalidServerUrl {
            url: server_url.to_string(),
            source,
        };
        let mut base_url = Url::parse(server_url.trim()).map_err(invalid)?;
        if base_url.cannot_be_a_base() {
            return Err(EndpointError::NotABase(server_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let analyze_url = base_url
            .join(ANALYZE_PATH.trim_start_matches('/'))
            .map_err(invalid)?;

        Ok(Self {
            http,
            base_url,
            analyze_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }
}

fn part_mime_type(file: &SelectedFile) -> String {
    file.mime_type
        .as_deref()
        .and_then(|raw| raw.parse::<mime_guess::mime::Mime>().ok())
        .unwrap_or_else(|| mime_guess::from_path(&file.name).first_or_octet_stream())
        .essence_str()
        .to_string()
}

pub(crate) fn build_form(params: UploadParameters) -> Result<Form, RequestError> {
    let mime_type = part_mime_type(&params.file);
    let file_part = Part::bytes(params.file.bytes)
        .file_name(params.file.name)
        .mime_str(&mime_type)
        .map_err(|err| RequestError::Transport(format!("invalid upload part: {err}")))?;

    let mut form = Form::new()
        .part(FIELD_FILE, file_part)
        .text(FIELD_MICRONS_PER_PIXEL, params.microns_per_pixel)
        .text(FIELD_FPS, params.fps)
        .text(FIELD_DROP_VOLUME_UL, params.drop_volume_ul)
        .text(FIELD_CONFIDENCE, params.confidence_threshold);

    if let Some(weights) = params.extras.weights {
        form = form.text(FIELD_WEIGHTS, weights);
    }
    if let Some(max_frames) = params.extras.max_frames {
        form = form.text(FIELD_MAX_FRAMES, max_frames);
    }
    Ok(form)
}

#[async_trait]
impl AnalysisEndpoint for HttpEndpoint {
    async fn post_analysis(&self, params: UploadParameters) -> Result<RawResponse, RequestError> {
        let form = build_form(params)?;
        let response = self
            .http
            .post(self.analyze_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| RequestError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| RequestError::Transport(err.to_string()))?;
        Ok(RawResponse::new(status.as_u16(), body))
    }
}

/// Maps a received response onto an outcome, or reports it as unexpected.
pub fn classify_response(raw: &RawResponse) -> Result<AnalysisOutcome, UnexpectedResponse> {
    if raw.status != StatusCode::OK.as_u16() {
        let error = match server_error_message(&raw.body) {
            Some(message) => RequestError::Server {
                status: raw.status,
                message,
            },
            None => RequestError::ResponseParse { status: raw.status },
        };
        warn!(status = raw.status, category = ?error.category(), "analysis request failed");
        return Ok(AnalysisOutcome::Failure {
            message: error.user_message(),
        });
    }

    let Ok(payload) = serde_json::from_str::<Value>(&raw.body) else {
        warn!("analysis response body is not json");
        return Err(UnexpectedResponse::new(raw.body.clone()));
    };

    if response_status(&payload) != Some(STATUS_DONE) {
        warn!(status = ?response_status(&payload), "analysis response has unexpected status");
        return Err(UnexpectedResponse::new(payload.to_string()));
    }

    match serde_json::from_value::<AnalyzeDoneResponse>(payload.clone()) {
        Ok(done) => Ok(AnalysisOutcome::Success(done.into())),
        Err(err) => {
            warn!(error = %err, "analysis response fields are malformed");
            Err(UnexpectedResponse::new(payload.to_string()))
        }
    }
}

/// Owns the request lifecycle for one page.
pub struct UploadCoordinator<E> {
    endpoint: E,
    state: RequestState,
}

impl<E: AnalysisEndpoint> UploadCoordinator<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Locks the gate, sends `params` and unlocks once the request settles.
    ///
    /// The gate is unlocked exactly once on every path, before the caller sees the result.
    pub async fn submit(
        &mut self,
        params: UploadParameters,
        gate: &mut impl SubmissionGate,
    ) -> Result<AnalysisOutcome, UnexpectedResponse> {
        self.state = RequestState::InFlight;
        gate.lock();
        info!(
            file = %params.file.name,
            bytes = params.file.bytes.len(),
            "analysis request dispatched"
        );

        let settlement = match self.endpoint.post_analysis(params).await {
            Ok(raw) => {
                debug!(status = raw.status, "analysis response received");
                classify_response(&raw)
            }
            Err(err) => {
                warn!(error = %err, "analysis request did not complete");
                Ok(AnalysisOutcome::Failure {
                    message: err.user_message(),
                })
            }
        };

        self.state = RequestState::Settled;
        gate.unlock();
        info!(
            success = matches!(settlement, Ok(AnalysisOutcome::Success(_))),
            "analysis request settled"
        );
        settlement
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
