use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::AnalysisArtifacts;

pub const ANALYZE_PATH: &str = "/analyze";

pub const FIELD_FILE: &str = "file";
pub const FIELD_MICRONS_PER_PIXEL: &str = "microns_per_pixel";
pub const FIELD_FPS: &str = "fps";
pub const FIELD_DROP_VOLUME_UL: &str = "drop_volume_ul";
pub const FIELD_CONFIDENCE: &str = "conf";
pub const FIELD_WEIGHTS: &str = "weights";
pub const FIELD_MAX_FRAMES: &str = "max_frames";

pub const STATUS_DONE: &str = "done";

/// Message used whenever the server's failure cannot be read from its response.
pub const FALLBACK_SERVER_ERROR: &str = "Erro no servidor.";

pub const NOTICE_NO_FILE_SELECTED: &str = "Selecione um arquivo primeiro.";
pub const NOTICE_ERROR_PREFIX: &str = "Erro: ";
pub const NOTICE_UNEXPECTED_PREFIX: &str = "Resposta inesperada: ";

/// Body of a finished analysis (`status == "done"`).
///
/// `summary` must be present. Artifact fields that are missing, null, empty or not strings
/// are read as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeDoneResponse {
    pub status: String,
    pub summary: Value,
    #[serde(default, deserialize_with = "artifact_url")]
    pub processed_video: Option<String>,
    #[serde(default, deserialize_with = "artifact_url")]
    pub report_json: Option<String>,
    #[serde(default, deserialize_with = "artifact_url")]
    pub report_md: Option<String>,
    #[serde(default, deserialize_with = "artifact_url")]
    pub histogram: Option<String>,
}

fn artifact_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string))
}

impl From<AnalyzeDoneResponse> for AnalysisArtifacts {
    fn from(value: AnalyzeDoneResponse) -> Self {
        Self {
            summary: value.summary,
            processed_video_url: value.processed_video,
            report_json_url: value.report_json,
            report_markdown_url: value.report_md,
            histogram_url: value.histogram,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// Reads the `error` field from a failure body, if it is JSON and carries a non-empty one.
pub fn server_error_message(body: &str) -> Option<String> {
    let parsed: AnalyzeErrorResponse = serde_json::from_str(body).ok()?;
    parsed.error.filter(|message| !message.is_empty())
}

/// Returns the `status` field of a 200 body when it is a string.
pub fn response_status(payload: &Value) -> Option<&str> {
    payload.get("status").and_then(Value::as_str)
}
