use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A file picked on the input surface, held in memory until it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Fields the analysis service accepts but the form does not require.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalAnalysisFields {
    pub weights: Option<String>,
    pub max_frames: Option<String>,
}

/// One submission's payload. Numeric values are carried verbatim; the server parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadParameters {
    pub file: SelectedFile,
    pub microns_per_pixel: String,
    pub fps: String,
    pub drop_volume_ul: String,
    pub confidence_threshold: String,
    pub extras: OptionalAnalysisFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Settled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Success(AnalysisArtifacts),
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisArtifacts {
    pub summary: Value,
    pub processed_video_url: Option<String>,
    pub report_json_url: Option<String>,
    pub report_markdown_url: Option<String>,
    pub histogram_url: Option<String>,
}

impl AnalysisArtifacts {
    /// Links for the artifacts present in this response, in display order.
    pub fn links(&self) -> Vec<ArtifactLink> {
        [
            (ArtifactKind::ReportJson, &self.report_json_url),
            (ArtifactKind::ReportMarkdown, &self.report_markdown_url),
            (ArtifactKind::Histogram, &self.histogram_url),
        ]
        .into_iter()
        .filter_map(|(kind, href)| {
            href.as_ref().map(|href| ArtifactLink {
                kind,
                href: href.clone(),
            })
        })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    ReportJson,
    ReportMarkdown,
    Histogram,
}

impl ArtifactKind {
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::ReportJson => "JSON do Relatório",
            ArtifactKind::ReportMarkdown => "Relatório (Markdown)",
            ArtifactKind::Histogram => "Histograma",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLink {
    pub kind: ArtifactKind,
    pub href: String,
}

impl ArtifactLink {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}
