use shared::{
    domain::{AnalysisArtifacts, AnalysisOutcome},
    error::{failure_notice, UnexpectedResponse},
};
use tracing::debug;

use crate::surface::{NoticeSink, OutputSurface};

pub struct ResponseRenderer;

impl ResponseRenderer {
    pub fn render(
        outcome: AnalysisOutcome,
        output: &mut impl OutputSurface,
        notices: &mut impl NoticeSink,
    ) {
        match outcome {
            AnalysisOutcome::Success(artifacts) => Self::render_success(&artifacts, output),
            // Failure leaves the result area exactly as it was.
            AnalysisOutcome::Failure { message } => notices.notify(&failure_notice(&message)),
        }
    }

    pub fn render_unexpected(unexpected: &UnexpectedResponse, notices: &mut impl NoticeSink) {
        notices.notify(&unexpected.notice());
    }

    fn render_success(artifacts: &AnalysisArtifacts, output: &mut impl OutputSurface) {
        output.clear_summary();
        output.clear_links();
        output.set_video_source(None);

        output.set_results_visible(true);
        output.set_summary(&pretty_summary(artifacts));
        if let Some(video) = artifacts.processed_video_url.as_deref() {
            output.set_video_source(Some(video));
        }

        let links = artifacts.links();
        for link in &links {
            output.push_link(link);
        }
        debug!(links = links.len(), "analysis result rendered");
    }
}

/// `summary` as two-space indented JSON.
pub fn pretty_summary(artifacts: &AnalysisArtifacts) -> String {
    serde_json::to_string_pretty(&artifacts.summary)
        .unwrap_or_else(|_| artifacts.summary.to_string())
}

#[cfg(test)]
#[path = "tests/renderer_tests.rs"]
mod tests;
