use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{
    domain::{ArtifactLink, SelectedFile, UploadParameters},
    error::RequestError,
};

use crate::{
    coordinator::{AnalysisEndpoint, RawResponse},
    gate::SubmissionGate,
    surface::{InputSurface, NoticeSink, OutputSurface},
};

/// Ordered log shared between fakes so tests can assert cross-component ordering.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().expect("journal lock").push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("journal lock").clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.as_str() == entry)
            .count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }
}

#[derive(Clone)]
pub struct FakeForm {
    pub file: Option<SelectedFile>,
    pub microns: String,
    pub fps: String,
    pub volume: String,
    pub conf: String,
    pub weights: Option<String>,
    pub max_frames: Option<String>,
}

impl FakeForm {
    pub fn with_file() -> Self {
        Self {
            file: Some(SelectedFile::new("sample.mp4", b"video-bytes".to_vec())),
            ..Self::empty()
        }
    }

    pub fn empty() -> Self {
        Self {
            file: None,
            microns: "0.5".into(),
            fps: "25".into(),
            volume: "2.0".into(),
            conf: "0.25".into(),
            weights: None,
            max_frames: None,
        }
    }
}

impl InputSurface for FakeForm {
    fn selected_file(&self) -> Option<SelectedFile> {
        self.file.clone()
    }

    fn microns_per_pixel(&self) -> String {
        self.microns.clone()
    }

    fn fps(&self) -> String {
        self.fps.clone()
    }

    fn drop_volume_ul(&self) -> String {
        self.volume.clone()
    }

    fn confidence_threshold(&self) -> String {
        self.conf.clone()
    }

    fn weights(&self) -> Option<String> {
        self.weights.clone()
    }

    fn max_frames(&self) -> Option<String> {
        self.max_frames.clone()
    }
}

pub struct RecordingOutput {
    pub submit_enabled: bool,
    pub progress_visible: bool,
    pub results_visible: bool,
    pub summary: String,
    pub video: Option<String>,
    pub links: Vec<ArtifactLink>,
    pub journal: Journal,
}

impl RecordingOutput {
    pub fn new(journal: Journal) -> Self {
        Self {
            submit_enabled: true,
            progress_visible: false,
            results_visible: false,
            summary: String::new(),
            video: None,
            links: Vec::new(),
            journal,
        }
    }
}

impl OutputSurface for RecordingOutput {
    fn set_submit_enabled(&mut self, enabled: bool) {
        self.journal.record(format!("submit_enabled={enabled}"));
        self.submit_enabled = enabled;
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.progress_visible = visible;
    }

    fn set_results_visible(&mut self, visible: bool) {
        self.results_visible = visible;
    }

    fn set_summary(&mut self, text: &str) {
        self.summary = text.to_string();
    }

    fn clear_summary(&mut self) {
        self.summary.clear();
    }

    fn set_video_source(&mut self, url: Option<&str>) {
        self.video = url.map(str::to_string);
    }

    fn clear_links(&mut self) {
        self.links.clear();
    }

    fn push_link(&mut self, link: &ArtifactLink) {
        self.links.push(link.clone());
    }
}

pub struct RecordingNotices {
    pub messages: Vec<String>,
    pub journal: Journal,
}

impl RecordingNotices {
    pub fn new(journal: Journal) -> Self {
        Self {
            messages: Vec::new(),
            journal,
        }
    }
}

impl NoticeSink for RecordingNotices {
    fn notify(&mut self, message: &str) {
        self.journal.record("notice");
        self.messages.push(message.to_string());
    }
}

pub struct CountingGate {
    pub journal: Journal,
}

impl SubmissionGate for CountingGate {
    fn lock(&mut self) {
        self.journal.record("lock");
    }

    fn unlock(&mut self) {
        self.journal.record("unlock");
    }
}

/// Endpoint that answers every request with the same canned result.
pub struct ScriptedEndpoint {
    response: Result<RawResponse, RequestError>,
    pub sent: Arc<Mutex<Vec<UploadParameters>>>,
    journal: Journal,
}

impl ScriptedEndpoint {
    pub fn responding(status: u16, body: impl Into<String>, journal: Journal) -> Self {
        Self {
            response: Ok(RawResponse::new(status, body)),
            sent: Arc::new(Mutex::new(Vec::new())),
            journal,
        }
    }

    pub fn unreachable(journal: Journal) -> Self {
        Self {
            response: Err(RequestError::Transport("connection refused".into())),
            sent: Arc::new(Mutex::new(Vec::new())),
            journal,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("sent lock").len()
    }
}

#[async_trait]
impl AnalysisEndpoint for ScriptedEndpoint {
    async fn post_analysis(&self, params: UploadParameters) -> Result<RawResponse, RequestError> {
        self.journal.record("send");
        self.sent.lock().expect("sent lock").push(params);
        self.response.clone()
    }
}

pub fn full_done_payload() -> Value {
    json!({
        "status": "done",
        "report_json": "/reports/1700000000_abc123/report.json",
        "report_md": "/reports/1700000000_abc123/report.md",
        "histogram": "/reports/1700000000_abc123/vel_hist.png",
        "processed_video": "/reports/1700000000_abc123/processed.mp4",
        "summary": {
            "motilidade_progressiva_%": 42.5,
            "vigor_medio": 0.61,
            "n_trajetorias": 8
        }
    })
}

pub fn sample_params() -> UploadParameters {
    crate::collector::ParameterCollector::collect(&FakeForm::with_file()).expect("params")
}
