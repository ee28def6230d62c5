//! Submit-event orchestration over an injected page.

use shared::domain::{AnalysisOutcome, RequestState};
use tracing::info;

use crate::{
    collector::ParameterCollector,
    coordinator::{AnalysisEndpoint, UploadCoordinator},
    gate::UiGate,
    renderer::ResponseRenderer,
    surface::{InputSurface, NoticeSink, OutputSurface, PageContext},
};

/// How a submit event ended, once the page has been updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Rejected before any request was issued.
    Rejected,
    Succeeded,
    Failed,
    /// 200 response with a status other than `done`.
    Unexpected,
}

pub struct AnalyzeController<E, I, O, N> {
    page: PageContext<I, O, N>,
    coordinator: UploadCoordinator<E>,
}

impl<E, I, O, N> AnalyzeController<E, I, O, N>
where
    E: AnalysisEndpoint,
    I: InputSurface,
    O: OutputSurface,
    N: NoticeSink,
{
    pub fn new(endpoint: E, page: PageContext<I, O, N>) -> Self {
        Self {
            page,
            coordinator: UploadCoordinator::new(endpoint),
        }
    }

    pub fn page(&self) -> &PageContext<I, O, N> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut PageContext<I, O, N> {
        &mut self.page
    }

    pub fn request_state(&self) -> RequestState {
        self.coordinator.state()
    }

    pub fn into_page(self) -> PageContext<I, O, N> {
        self.page
    }

    /// Handles one submit event end to end.
    pub async fn on_submit(&mut self) -> SubmissionResult {
        let params = match ParameterCollector::collect(&self.page.input) {
            Ok(params) => params,
            Err(err) => {
                info!(reason = %err, "submission rejected");
                self.page.notices.notify(&err.notice());
                return SubmissionResult::Rejected;
            }
        };

        let settlement = {
            let mut gate = UiGate::new(&mut self.page.output);
            self.coordinator.submit(params, &mut gate).await
        };

        match settlement {
            Ok(outcome) => {
                let result = match &outcome {
                    AnalysisOutcome::Success(_) => SubmissionResult::Succeeded,
                    AnalysisOutcome::Failure { .. } => SubmissionResult::Failed,
                };
                ResponseRenderer::render(outcome, &mut self.page.output, &mut self.page.notices);
                result
            }
            Err(unexpected) => {
                ResponseRenderer::render_unexpected(&unexpected, &mut self.page.notices);
                SubmissionResult::Unexpected
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
