//! Presentation seams the controller drives. A front end implements these for its own widgets.

use shared::domain::{ArtifactLink, SelectedFile};

/// Raw form state as the user left it.
pub trait InputSurface {
    fn selected_file(&self) -> Option<SelectedFile>;
    fn microns_per_pixel(&self) -> String;
    fn fps(&self) -> String;
    fn drop_volume_ul(&self) -> String;
    fn confidence_threshold(&self) -> String;

    fn weights(&self) -> Option<String> {
        None
    }

    fn max_frames(&self) -> Option<String> {
        None
    }
}

/// Result area, progress indicator and submit control.
pub trait OutputSurface {
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_progress_visible(&mut self, visible: bool);
    fn set_results_visible(&mut self, visible: bool);
    fn set_summary(&mut self, text: &str);
    fn clear_summary(&mut self);
    fn set_video_source(&mut self, url: Option<&str>);
    fn clear_links(&mut self);
    fn push_link(&mut self, link: &ArtifactLink);
}

/// Blocking user notification.
pub trait NoticeSink {
    fn notify(&mut self, message: &str);
}

/// Surfaces for one page, handed to the controller at construction.
pub struct PageContext<I, O, N> {
    pub input: I,
    pub output: O,
    pub notices: N,
}

impl<I, O, N> PageContext<I, O, N>
where
    I: InputSurface,
    O: OutputSurface,
    N: NoticeSink,
{
    pub fn new(input: I, output: O, notices: N) -> Self {
        Self {
            input,
            output,
            notices,
        }
    }
}
