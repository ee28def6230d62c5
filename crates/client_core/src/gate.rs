use tracing::debug;

use crate::surface::OutputSurface;

/// Lock/unlock hooks the coordinator fires around a request.
pub trait SubmissionGate {
    fn lock(&mut self);
    fn unlock(&mut self);
}

/// Gate backed by the page's output surface.
pub struct UiGate<'a, O: OutputSurface> {
    output: &'a mut O,
}

impl<'a, O: OutputSurface> UiGate<'a, O> {
    pub fn new(output: &'a mut O) -> Self {
        Self { output }
    }
}

impl<O: OutputSurface> SubmissionGate for UiGate<'_, O> {
    fn lock(&mut self) {
        self.output.set_submit_enabled(false);
        self.output.set_progress_visible(true);
        self.output.set_results_visible(false);
        // Stale output is dropped here, not at render time.
        self.output.clear_summary();
        self.output.clear_links();
        self.output.set_video_source(None);
        debug!("ui gate locked");
    }

    fn unlock(&mut self) {
        self.output.set_progress_visible(false);
        self.output.set_submit_enabled(true);
        debug!("ui gate unlocked");
    }
}

#[cfg(test)]
#[path = "tests/gate_tests.rs"]
mod tests;
