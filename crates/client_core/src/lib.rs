//! Client for the motility analysis service: form collection, the upload lifecycle and
//! result rendering, all driven through injected surfaces.

pub mod collector;
pub mod controller;
pub mod coordinator;
pub mod gate;
pub mod renderer;
pub mod surface;

pub use collector::ParameterCollector;
pub use controller::{AnalyzeController, SubmissionResult};
pub use coordinator::{
    classify_response, AnalysisEndpoint, EndpointError, HttpEndpoint, RawResponse,
    UploadCoordinator,
};
pub use gate::{SubmissionGate, UiGate};
pub use renderer::{pretty_summary, ResponseRenderer};
pub use surface::{InputSurface, NoticeSink, OutputSurface, PageContext};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
