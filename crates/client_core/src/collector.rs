use shared::{
    domain::{OptionalAnalysisFields, UploadParameters},
    error::ValidationError,
};

use crate::surface::InputSurface;

/// Builds the request payload from the form. Only the file is checked.
pub struct ParameterCollector;

impl ParameterCollector {
    pub fn collect(input: &impl InputSurface) -> Result<UploadParameters, ValidationError> {
        let file = input
            .selected_file()
            .ok_or(ValidationError::NoFileSelected)?;

        Ok(UploadParameters {
            file,
            microns_per_pixel: input.microns_per_pixel(),
            fps: input.fps(),
            drop_volume_ul: input.drop_volume_ul(),
            confidence_threshold: input.confidence_threshold(),
            extras: OptionalAnalysisFields {
                weights: input.weights().filter(|v| !v.is_empty()),
                max_frames: input.max_frames().filter(|v| !v.is_empty()),
            },
        })
    }
}

#[cfg(test)]
#[path = "tests/collector_tests.rs"]
mod tests;
